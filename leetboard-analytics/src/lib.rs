/// Skill distribution, top performers and per-user language ranking.
pub mod distribution;
/// Search and skill-level filtering.
pub mod filter;
/// Normalization of raw snapshot/row JSON into records.
pub mod ingest;
/// Guaranteed-shape user record types.
pub mod model;
/// Sort keys and comparators.
pub mod sort;
/// Summary statistics over a record batch.
pub mod stats;
/// Combined filter + sort + stats entry point.
pub mod view;

pub use distribution::{SkillShare, skill_distribution, top_languages, top_performers};
pub use filter::{SkillFilter, filter_records};
pub use ingest::{IngestReport, RawShape, Rejection, ingest};
pub use model::{SkillLevel, UserRecord};
pub use sort::{SortKey, sort_records};
pub use stats::{SummaryStats, compute_stats};
pub use view::{DerivedView, ViewQuery, derive_view};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{SkillLevel, UserRecord};

    pub fn record(
        id: &str,
        total_solved: u64,
        skill: Option<SkillLevel>,
        streak: u64,
    ) -> UserRecord {
        let mut record = UserRecord {
            leetcode_id: id.to_owned(),
            display_name: id.to_owned(),
            ..UserRecord::default()
        };
        record.profile.total_solved = total_solved;
        record.analysis.skill_level = skill;
        record.consistency.current_streak = streak;
        record
    }
}
