use std::fmt;

use crate::model::{SkillLevel, UserRecord};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SkillFilter {
    #[default]
    All,
    Level(SkillLevel),
    /// A value naming no known level. Matches nothing.
    Unknown(String),
}

impl SkillFilter {
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("all") {
            return SkillFilter::All;
        }

        match SkillLevel::from_label(value) {
            Some(level) => SkillFilter::Level(level),
            None => SkillFilter::Unknown(value.to_owned()),
        }
    }

    pub fn matches(&self, level: Option<SkillLevel>) -> bool {
        match self {
            SkillFilter::All => true,
            SkillFilter::Level(wanted) => level == Some(*wanted),
            SkillFilter::Unknown(_) => false,
        }
    }
}

impl fmt::Display for SkillFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillFilter::All => f.write_str("all"),
            SkillFilter::Level(level) => f.write_str(level.as_str()),
            SkillFilter::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// Case-insensitive substring match against display name, LeetCode id or school.
pub fn matches_search(record: &UserRecord, search_term: &str) -> bool {
    let needle = search_term.to_lowercase();
    matches_lowercase_needle(record, &needle)
}

fn matches_lowercase_needle(record: &UserRecord, needle: &str) -> bool {
    record.display_name.to_lowercase().contains(needle)
        || record.leetcode_id.to_lowercase().contains(needle)
        || record
            .school()
            .is_some_and(|school| school.to_lowercase().contains(needle))
}

/// Keep records passing both the search and skill predicates, in input order.
pub fn filter_records<'a>(
    records: &'a [UserRecord],
    search_term: &str,
    skill_filter: &SkillFilter,
) -> Vec<&'a UserRecord> {
    let needle = search_term.to_lowercase();

    records
        .iter()
        .filter(|record| {
            matches_lowercase_needle(record, &needle)
                && skill_filter.matches(record.analysis.skill_level)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::{SkillFilter, filter_records, matches_search};
    use crate::fixtures::record;
    use crate::model::{SkillLevel, UserRecord};

    fn batch() -> Vec<UserRecord> {
        let mut records = vec![
            record("alice", 10, Some(SkillLevel::Expert), 3),
            record("bob", 20, Some(SkillLevel::Beginner), 1),
            record("carol", 30, None, 0),
            record("dave", 40, Some(SkillLevel::Expert), 2),
        ];
        records[0].display_name = "Alice Liddell".to_owned();
        records[1].profile.school = Some("Stanford University".to_owned());
        records
    }

    #[test]
    fn parses_skill_filters() {
        assert_eq!(SkillFilter::parse("all"), SkillFilter::All);
        assert_eq!(SkillFilter::parse("ALL"), SkillFilter::All);
        assert_eq!(
            SkillFilter::parse("Expert"),
            SkillFilter::Level(SkillLevel::Expert)
        );
        assert_eq!(
            SkillFilter::parse("wizard"),
            SkillFilter::Unknown("wizard".to_owned())
        );
    }

    #[test]
    fn empty_search_and_all_skills_keep_everything() {
        let records = batch();
        let filtered = filter_records(&records, "", &SkillFilter::All);
        assert_eq!(filtered.len(), records.len());
    }

    #[test]
    fn output_is_an_order_preserving_subsequence() {
        let records = batch();
        let filtered = filter_records(&records, "", &SkillFilter::Level(SkillLevel::Expert));

        assert_eq!(filtered.len(), 2);
        assert!(ptr::eq(filtered[0], &records[0]));
        assert!(ptr::eq(filtered[1], &records[3]));
    }

    #[test]
    fn search_is_case_insensitive_across_name_id_and_school() {
        let records = batch();

        let by_name = filter_records(&records, "LIDDELL", &SkillFilter::All);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].leetcode_id, "alice");

        let by_id = filter_records(&records, "Car", &SkillFilter::All);
        assert_eq!(by_id[0].leetcode_id, "carol");

        let by_school = filter_records(&records, "stanford", &SkillFilter::All);
        assert_eq!(by_school.len(), 1);
        assert_eq!(by_school[0].leetcode_id, "bob");
    }

    #[test]
    fn missing_school_is_never_a_match() {
        let record = record("x", 1, None, 0);
        assert!(!matches_search(&record, "stanford"));
    }

    #[test]
    fn unclassified_records_only_pass_all() {
        let records = batch();
        let beginners = filter_records(&records, "carol", &SkillFilter::Level(SkillLevel::Beginner));
        assert!(beginners.is_empty());

        let everyone = filter_records(&records, "carol", &SkillFilter::All);
        assert_eq!(everyone.len(), 1);
    }

    #[test]
    fn unknown_skill_filter_yields_empty_result() {
        let records = batch();
        let filtered = filter_records(&records, "", &SkillFilter::parse("Grandmaster"));
        assert!(filtered.is_empty());
    }
}
