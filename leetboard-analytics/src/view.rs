use crate::filter::{SkillFilter, filter_records};
use crate::model::UserRecord;
use crate::sort::{SortKey, sort_records};
use crate::stats::{SummaryStats, compute_stats};

/// Search term, skill filter and sort key. Together with a snapshot version
/// this fully determines a [`DerivedView`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewQuery {
    pub search: String,
    pub skill: SkillFilter,
    pub sort: SortKey,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DerivedView<'a> {
    /// Computed over the whole batch, not just the visible records.
    pub stats: SummaryStats<'a>,
    pub visible: Vec<&'a UserRecord>,
}

pub fn derive_view<'a>(records: &'a [UserRecord], query: &ViewQuery) -> DerivedView<'a> {
    let filtered = filter_records(records, &query.search, &query.skill);

    DerivedView {
        stats: compute_stats(records),
        visible: sort_records(filtered, query.sort),
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewQuery, derive_view};
    use crate::filter::SkillFilter;
    use crate::fixtures::record;
    use crate::model::{SkillLevel, UserRecord};
    use crate::sort::SortKey;

    fn scenario() -> Vec<UserRecord> {
        vec![
            record("a", 10, Some(SkillLevel::Expert), 3),
            record("b", 20, Some(SkillLevel::Beginner), 1),
        ]
    }

    fn visible_ids(records: &[&UserRecord]) -> Vec<String> {
        records.iter().map(|record| record.leetcode_id.clone()).collect()
    }

    #[test]
    fn default_query_sorts_by_total_solved() {
        let records = scenario();
        let view = derive_view(&records, &ViewQuery::default());

        assert_eq!(visible_ids(&view.visible), ["b", "a"]);
        assert_eq!(view.stats.total_users, 2);
        assert_eq!(view.stats.average_solved, 15);
        assert_eq!(
            view.stats.top_performer.map(|top| top.leetcode_id.as_str()),
            Some("b")
        );
    }

    #[test]
    fn skill_filter_narrows_visible_but_not_stats() {
        let records = scenario();
        let query = ViewQuery {
            skill: SkillFilter::parse("Expert"),
            ..ViewQuery::default()
        };

        let view = derive_view(&records, &query);
        assert_eq!(visible_ids(&view.visible), ["a"]);
        assert_eq!(view.stats.total_users, 2);
    }

    #[test]
    fn missing_school_search_excludes_without_panicking() {
        let records = scenario();
        let query = ViewQuery {
            search: "stanford".to_owned(),
            ..ViewQuery::default()
        };

        assert!(derive_view(&records, &query).visible.is_empty());
    }

    #[test]
    fn deriving_twice_is_idempotent() {
        let records = scenario();
        let query = ViewQuery {
            search: String::new(),
            skill: SkillFilter::All,
            sort: SortKey::CurrentStreak,
        };

        assert_eq!(derive_view(&records, &query), derive_view(&records, &query));
    }

    #[test]
    fn empty_batch_degrades_to_zero_values() {
        let view = derive_view(&[], &ViewQuery::default());
        assert!(view.visible.is_empty());
        assert_eq!(view.stats.total_users, 0);
        assert_eq!(view.stats.average_solved, 0);
    }
}
