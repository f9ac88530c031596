use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    ConsistencyStats, DifficultyAnalysis, DifficultyBreakdown, Profile, RecentActivity,
    SkillLevel, UserRecord,
};

/// Which external layout a batch of JSON values uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RawShape {
    /// Nested `data.full_profile` / `data.difficulty_analysis` documents.
    Snapshot,
    /// Flat `user_profiles` table rows.
    Row,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub index: usize,
    pub leetcode_id: Option<String>,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub records: Vec<UserRecord>,
    pub rejected: Vec<Rejection>,
}

/// Normalize a raw batch into records, keeping input order.
///
/// Entries that cannot be shaped into a [`UserRecord`] are reported in
/// `rejected` and never abort the batch. A repeated `leetcode_id` keeps the
/// first occurrence.
pub fn ingest(values: Vec<Value>, shape: RawShape) -> IngestReport {
    let mut report = IngestReport {
        records: Vec::with_capacity(values.len()),
        rejected: Vec::new(),
    };
    let mut seen_ids = HashSet::new();

    for (index, value) in values.into_iter().enumerate() {
        let leetcode_id = value
            .get("leetcode_id")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let normalized = match shape {
            RawShape::Snapshot => normalize_snapshot(value),
            RawShape::Row => normalize_row(value),
        };

        let outcome = normalized.and_then(|record| {
            if seen_ids.insert(record.leetcode_id.clone()) {
                Ok(record)
            } else {
                Err("duplicate leetcode_id".to_owned())
            }
        });

        match outcome {
            Ok(record) => report.records.push(record),
            Err(reason) => report.rejected.push(Rejection {
                index,
                leetcode_id,
                reason,
            }),
        }
    }

    report
}

fn normalize_snapshot(value: Value) -> Result<UserRecord, String> {
    if !value.is_object() {
        return Err("entry is not a JSON object".to_owned());
    }

    let raw: RawSnapshotUser =
        serde_json::from_value(value).map_err(|e| format!("malformed entry: {e}"))?;
    let leetcode_id = required_id(raw.leetcode_id)?;

    let data = raw.data.unwrap_or_default();
    let Some(full_profile) = data.full_profile else {
        return Err("missing data.full_profile".to_owned());
    };
    let Some(analysis) = data.difficulty_analysis else {
        return Err("missing data.difficulty_analysis".to_owned());
    };
    let consistency = data.consistency_stats.unwrap_or_default();
    let distribution = analysis.difficulty_distribution.unwrap_or_default();

    let mut profile = full_profile.into_profile();
    if profile.total_solved == 0 {
        profile.total_solved = count(analysis.total_solved);
    }
    if profile.overall_acceptance_rate == 0.0 {
        profile.overall_acceptance_rate = rate(analysis.overall_acceptance_rate);
    }

    let recent = consistency.recent_activity.unwrap_or_default();

    Ok(UserRecord {
        leetcode_id,
        display_name: raw.display_name.unwrap_or_default(),
        collected_at: non_blank(raw.collected_at),
        analysis: DifficultyAnalysis {
            skill_level: analysis.skill_level.as_deref().and_then(SkillLevel::from_exact),
            easy: breakdown(distribution.easy, profile.easy_solved),
            medium: breakdown(distribution.medium, profile.medium_solved),
            hard: breakdown(distribution.hard, profile.hard_solved),
        },
        consistency: ConsistencyStats {
            current_streak: count(consistency.current_streak),
            max_streak: count(consistency.max_streak),
            total_days_active: count(consistency.total_days_active),
            recent_activity: RecentActivity {
                last_7_days: count(recent.last_7_days),
                last_30_days: count(recent.last_30_days),
            },
        },
        profile,
    })
}

fn normalize_row(value: Value) -> Result<UserRecord, String> {
    if !value.is_object() {
        return Err("row is not a JSON object".to_owned());
    }

    let row: RawProfileRow =
        serde_json::from_value(value).map_err(|e| format!("malformed row: {e}"))?;
    let leetcode_id = required_id(row.leetcode_id)?;

    let profile = Profile {
        username: non_blank(row.username),
        real_name: non_blank(row.real_name),
        about_me: non_blank(row.about_me),
        avatar_url: non_blank(row.avatar_url),
        location: non_blank(row.location),
        company: non_blank(row.company),
        school: non_blank(row.school),
        star_rating: positive(row.star_rating),
        ranking: positive(row.ranking).map(|value| value.round() as u64),
        reputation: count(row.reputation),
        easy_solved: count(row.easy_solved),
        medium_solved: count(row.medium_solved),
        hard_solved: count(row.hard_solved),
        total_solved: count(row.total_solved),
        easy_acceptance_rate: rate(row.easy_acceptance_rate),
        medium_acceptance_rate: rate(row.medium_acceptance_rate),
        hard_acceptance_rate: rate(row.hard_acceptance_rate),
        overall_acceptance_rate: rate(row.overall_acceptance_rate),
        language_stats: language_counts(row.language_stats),
    };

    Ok(UserRecord {
        leetcode_id,
        display_name: row.display_name.unwrap_or_default(),
        collected_at: non_blank(row.collected_at),
        analysis: DifficultyAnalysis {
            skill_level: row.skill_level.as_deref().and_then(SkillLevel::from_exact),
            easy: DifficultyBreakdown {
                solved: profile.easy_solved,
                completion: rate(row.easy_completion),
                acceptance_rate: rate(row.easy_difficulty_acceptance),
            },
            medium: DifficultyBreakdown {
                solved: profile.medium_solved,
                completion: rate(row.medium_completion),
                acceptance_rate: rate(row.medium_difficulty_acceptance),
            },
            hard: DifficultyBreakdown {
                solved: profile.hard_solved,
                completion: rate(row.hard_completion),
                acceptance_rate: rate(row.hard_difficulty_acceptance),
            },
        },
        consistency: ConsistencyStats {
            current_streak: count(row.current_streak),
            max_streak: count(row.max_streak),
            total_days_active: count(row.total_days_active),
            recent_activity: RecentActivity {
                last_7_days: count(row.last_7_days_activity),
                last_30_days: count(row.last_30_days_activity),
            },
        },
        profile,
    })
}

fn required_id(raw: Option<String>) -> Result<String, String> {
    non_blank(raw).ok_or_else(|| "missing leetcode_id".to_owned())
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Counts are rounded; negative, missing and non-finite values become 0.
fn count(raw: Option<f64>) -> u64 {
    match raw {
        Some(value) if value.is_finite() && value > 0.0 => value.round() as u64,
        _ => 0,
    }
}

fn rate(raw: Option<f64>) -> f64 {
    match raw {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

fn positive(raw: Option<f64>) -> Option<f64> {
    raw.filter(|value| value.is_finite() && *value > 0.0)
}

fn language_counts(raw: Option<BTreeMap<String, Value>>) -> BTreeMap<String, u64> {
    raw.unwrap_or_default()
        .into_iter()
        .filter_map(|(language, value)| {
            let language = language.trim().to_owned();
            if language.is_empty() {
                return None;
            }
            Some((language, count(value.as_f64())))
        })
        .collect()
}

fn breakdown(raw: Option<RawBreakdown>, profile_solved: u64) -> DifficultyBreakdown {
    let raw = raw.unwrap_or_default();
    let solved = match count(raw.solved) {
        0 => profile_solved,
        solved => solved,
    };

    DifficultyBreakdown {
        solved,
        completion: rate(raw.completion),
        acceptance_rate: rate(raw.acceptance_rate),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSnapshotUser {
    leetcode_id: Option<String>,
    display_name: Option<String>,
    collected_at: Option<String>,
    data: Option<RawSnapshotData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSnapshotData {
    full_profile: Option<RawFullProfile>,
    difficulty_analysis: Option<RawDifficultyAnalysis>,
    consistency_stats: Option<RawConsistencyStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFullProfile {
    username: Option<String>,
    real_name: Option<String>,
    about_me: Option<String>,
    avatar_url: Option<String>,
    location: Option<String>,
    company: Option<String>,
    school: Option<String>,
    star_rating: Option<f64>,
    ranking: Option<f64>,
    reputation: Option<f64>,
    easy_solved: Option<f64>,
    medium_solved: Option<f64>,
    hard_solved: Option<f64>,
    total_solved: Option<f64>,
    easy_acceptance_rate: Option<f64>,
    medium_acceptance_rate: Option<f64>,
    hard_acceptance_rate: Option<f64>,
    overall_acceptance_rate: Option<f64>,
    language_stats: Option<BTreeMap<String, Value>>,
}

impl RawFullProfile {
    fn into_profile(self) -> Profile {
        Profile {
            username: non_blank(self.username),
            real_name: non_blank(self.real_name),
            about_me: non_blank(self.about_me),
            avatar_url: non_blank(self.avatar_url),
            location: non_blank(self.location),
            company: non_blank(self.company),
            school: non_blank(self.school),
            star_rating: positive(self.star_rating),
            ranking: positive(self.ranking).map(|value| value.round() as u64),
            reputation: count(self.reputation),
            easy_solved: count(self.easy_solved),
            medium_solved: count(self.medium_solved),
            hard_solved: count(self.hard_solved),
            total_solved: count(self.total_solved),
            easy_acceptance_rate: rate(self.easy_acceptance_rate),
            medium_acceptance_rate: rate(self.medium_acceptance_rate),
            hard_acceptance_rate: rate(self.hard_acceptance_rate),
            overall_acceptance_rate: rate(self.overall_acceptance_rate),
            language_stats: language_counts(self.language_stats),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDifficultyAnalysis {
    skill_level: Option<String>,
    total_solved: Option<f64>,
    difficulty_distribution: Option<RawDistribution>,
    overall_acceptance_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDistribution {
    easy: Option<RawBreakdown>,
    medium: Option<RawBreakdown>,
    hard: Option<RawBreakdown>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBreakdown {
    solved: Option<f64>,
    completion: Option<f64>,
    acceptance_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConsistencyStats {
    current_streak: Option<f64>,
    max_streak: Option<f64>,
    total_days_active: Option<f64>,
    recent_activity: Option<RawRecentActivity>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecentActivity {
    last_7_days: Option<f64>,
    last_30_days: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProfileRow {
    leetcode_id: Option<String>,
    display_name: Option<String>,
    collected_at: Option<String>,
    username: Option<String>,
    real_name: Option<String>,
    about_me: Option<String>,
    avatar_url: Option<String>,
    location: Option<String>,
    company: Option<String>,
    school: Option<String>,
    star_rating: Option<f64>,
    ranking: Option<f64>,
    reputation: Option<f64>,
    easy_solved: Option<f64>,
    medium_solved: Option<f64>,
    hard_solved: Option<f64>,
    total_solved: Option<f64>,
    easy_acceptance_rate: Option<f64>,
    medium_acceptance_rate: Option<f64>,
    hard_acceptance_rate: Option<f64>,
    overall_acceptance_rate: Option<f64>,
    language_stats: Option<BTreeMap<String, Value>>,
    skill_level: Option<String>,
    current_streak: Option<f64>,
    max_streak: Option<f64>,
    total_days_active: Option<f64>,
    last_7_days_activity: Option<f64>,
    last_30_days_activity: Option<f64>,
    easy_completion: Option<f64>,
    medium_completion: Option<f64>,
    hard_completion: Option<f64>,
    easy_difficulty_acceptance: Option<f64>,
    medium_difficulty_acceptance: Option<f64>,
    hard_difficulty_acceptance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{RawShape, ingest};
    use crate::distribution::skill_distribution;
    use crate::filter::{SkillFilter, filter_records};
    use crate::model::SkillLevel;

    fn snapshot_entry(id: &str, total_solved: i64, skill: &str) -> serde_json::Value {
        json!({
            "leetcode_id": id,
            "display_name": format!("User {id}"),
            "collected_at": "2025-01-02T03:04:05Z",
            "data": {
                "full_profile": {
                    "username": id,
                    "school": "Stanford University",
                    "reputation": 4,
                    "easy_solved": 10,
                    "medium_solved": 5,
                    "hard_solved": 1,
                    "total_solved": total_solved,
                    "overall_acceptance_rate": 61.5,
                    "language_stats": { "Rust": 12, "Python3": 40 }
                },
                "difficulty_analysis": {
                    "skill_level": skill,
                    "total_solved": total_solved,
                    "difficulty_distribution": {
                        "easy": { "solved": 10, "completion": 1.2, "acceptance_rate": 70.0 },
                        "medium": { "solved": 5, "completion": 0.4, "acceptance_rate": 50.0 },
                        "hard": { "solved": 1, "completion": 0.1, "acceptance_rate": 20.0 }
                    },
                    "overall_acceptance_rate": 61.5
                },
                "consistency_stats": {
                    "current_streak": 3,
                    "max_streak": 9,
                    "total_days_active": 40,
                    "recent_activity": { "last_7_days": 2, "last_30_days": 11 }
                }
            }
        })
    }

    #[test]
    fn normalizes_snapshot_entries() {
        let report = ingest(vec![snapshot_entry("alice", 16, "Intermediate")], RawShape::Snapshot);

        assert!(report.rejected.is_empty());
        let record = &report.records[0];
        assert_eq!(record.leetcode_id, "alice");
        assert_eq!(record.display_name, "User alice");
        assert_eq!(record.profile.total_solved, 16);
        assert_eq!(record.school(), Some("Stanford University"));
        assert_eq!(record.analysis.skill_level, Some(SkillLevel::Intermediate));
        assert_eq!(record.analysis.medium.solved, 5);
        assert_eq!(record.consistency.current_streak, 3);
        assert_eq!(record.consistency.recent_activity.last_30_days, 11);
        assert_eq!(record.profile.language_stats.get("Python3"), Some(&40));
    }

    #[test]
    fn rejects_entries_missing_profile_or_analysis() {
        let mut no_profile = snapshot_entry("a", 1, "Expert");
        if let Some(data) = no_profile["data"].as_object_mut() {
            data.remove("full_profile");
        }
        let mut no_analysis = snapshot_entry("b", 1, "Expert");
        if let Some(data) = no_analysis["data"].as_object_mut() {
            data.remove("difficulty_analysis");
        }
        let no_data = json!({ "leetcode_id": "c", "display_name": "C" });

        let report = ingest(vec![no_profile, no_analysis, no_data], RawShape::Snapshot);

        assert!(report.records.is_empty());
        let reasons: Vec<&str> = report.rejected.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(
            reasons,
            [
                "missing data.full_profile",
                "missing data.difficulty_analysis",
                "missing data.full_profile"
            ]
        );
        assert_eq!(report.rejected[1].index, 1);
        assert_eq!(report.rejected[1].leetcode_id.as_deref(), Some("b"));
    }

    #[test]
    fn unknown_skill_level_is_unclassified() {
        let report = ingest(vec![snapshot_entry("a", 3, "Grandmaster")], RawShape::Snapshot);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].analysis.skill_level, None);
    }

    #[test]
    fn skill_level_must_match_stored_label_exactly() {
        let rows = vec![
            json!({ "leetcode_id": "a", "skill_level": "expert" }),
            json!({ "leetcode_id": "b", "skill_level": " EXPERT " }),
            json!({ "leetcode_id": "c", "skill_level": "Expert" }),
        ];
        let report = ingest(rows, RawShape::Row);
        let levels: Vec<_> = report
            .records
            .iter()
            .map(|record| record.analysis.skill_level)
            .collect();
        assert_eq!(levels, [None, None, Some(SkillLevel::Expert)]);

        let expert = SkillFilter::Level(SkillLevel::Expert);
        assert_eq!(filter_records(&report.records, "", &expert).len(), 1);
        assert_eq!(skill_distribution(&report.records)[3].count, 1);
    }

    #[test]
    fn negative_numbers_become_zero() {
        let mut entry = snapshot_entry("a", -5, "Beginner");
        entry["data"]["consistency_stats"]["current_streak"] = json!(-2);
        entry["data"]["full_profile"]["overall_acceptance_rate"] = json!(-10.0);
        entry["data"]["difficulty_analysis"]["overall_acceptance_rate"] = json!(null);

        let report = ingest(vec![entry], RawShape::Snapshot);
        let record = &report.records[0];

        assert_eq!(record.profile.total_solved, 0);
        assert_eq!(record.consistency.current_streak, 0);
        assert_eq!(record.profile.overall_acceptance_rate, 0.0);
    }

    #[test]
    fn rejects_non_objects_wrong_types_and_blank_ids() {
        let mut wrong_type = snapshot_entry("a", 1, "Expert");
        wrong_type["data"]["full_profile"]["total_solved"] = json!("lots");
        let blank_id = snapshot_entry("   ", 1, "Expert");

        let report = ingest(
            vec![json!(42), wrong_type, blank_id, snapshot_entry("ok", 1, "Expert")],
            RawShape::Snapshot,
        );

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].leetcode_id, "ok");
        assert_eq!(report.rejected.len(), 3);
        assert_eq!(report.rejected[0].reason, "entry is not a JSON object");
        assert!(report.rejected[1].reason.starts_with("malformed entry"));
        assert_eq!(report.rejected[2].reason, "missing leetcode_id");
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let report = ingest(
            vec![
                snapshot_entry("dup", 10, "Expert"),
                snapshot_entry("dup", 99, "Expert"),
            ],
            RawShape::Snapshot,
        );

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].profile.total_solved, 10);
        assert_eq!(report.rejected[0].reason, "duplicate leetcode_id");
    }

    #[test]
    fn missing_consistency_stats_defaults_to_zero() {
        let mut entry = snapshot_entry("a", 1, "Expert");
        if let Some(data) = entry["data"].as_object_mut() {
            data.remove("consistency_stats");
        }

        let report = ingest(vec![entry], RawShape::Snapshot);
        assert_eq!(report.records[0].consistency.max_streak, 0);
        assert_eq!(report.records[0].consistency.recent_activity.last_7_days, 0);
    }

    #[test]
    fn normalizes_flat_rows() {
        let row = json!({
            "id": "8d0c",
            "leetcode_id": "bob",
            "display_name": "Bob",
            "collected_at": "2025-01-02",
            "school": null,
            "company": "  ",
            "ranking": 12345,
            "reputation": 0,
            "easy_solved": 50,
            "medium_solved": 30,
            "hard_solved": 5,
            "total_solved": 85,
            "overall_acceptance_rate": 48.25,
            "language_stats": { "C++": 85, "": 3 },
            "skill_level": "Advanced",
            "current_streak": 4,
            "max_streak": 12,
            "total_days_active": 100,
            "last_7_days_activity": 6,
            "last_30_days_activity": 20,
            "easy_completion": 6.1,
            "medium_completion": 1.5,
            "hard_completion": 0.6,
            "easy_difficulty_acceptance": 75.0,
            "medium_difficulty_acceptance": 45.0,
            "hard_difficulty_acceptance": 20.0
        });

        let report = ingest(vec![row], RawShape::Row);
        let record = &report.records[0];

        assert_eq!(record.leetcode_id, "bob");
        assert_eq!(record.school(), None);
        assert_eq!(record.profile.company, None);
        assert_eq!(record.profile.ranking, Some(12345));
        assert_eq!(record.analysis.skill_level, Some(SkillLevel::Advanced));
        assert_eq!(record.analysis.hard.solved, 5);
        assert_eq!(record.analysis.easy.completion, 6.1);
        assert_eq!(record.consistency.recent_activity.last_7_days, 6);
        assert_eq!(record.profile.language_stats.len(), 1);
    }
}
