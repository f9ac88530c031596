use crate::model::{SkillLevel, UserRecord};
use crate::sort::{SortKey, sort_records};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillShare {
    pub level: SkillLevel,
    pub count: usize,
    /// Share of the whole batch in percent. Unclassified records count toward the total.
    pub percentage: f64,
}

pub fn skill_distribution(records: &[UserRecord]) -> [SkillShare; 4] {
    let total = records.len();

    SkillLevel::ALL.map(|level| {
        let count = records
            .iter()
            .filter(|record| record.analysis.skill_level == Some(level))
            .count();
        let percentage = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };

        SkillShare {
            level,
            count,
            percentage,
        }
    })
}

pub fn top_performers(records: &[UserRecord], limit: usize) -> Vec<&UserRecord> {
    let mut ranked = sort_records(records.iter().collect(), SortKey::TotalSolved);
    ranked.truncate(limit);
    ranked
}

/// Most-used languages by solved count; ties fall back to name order.
pub fn top_languages(record: &UserRecord, limit: usize) -> Vec<(&str, u64)> {
    let mut languages: Vec<(&str, u64)> = record
        .profile
        .language_stats
        .iter()
        .map(|(language, count)| (language.as_str(), *count))
        .collect();

    languages.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(right.0)));
    languages.truncate(limit);
    languages
}
