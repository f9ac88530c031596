use std::cmp::Ordering;
use std::fmt;

use crate::model::UserRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    TotalSolved,
    CurrentStreak,
    OverallAcceptanceRate,
    DisplayName,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::TotalSolved,
        SortKey::CurrentStreak,
        SortKey::OverallAcceptanceRate,
        SortKey::DisplayName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::TotalSolved => "total_solved",
            SortKey::CurrentStreak => "current_streak",
            SortKey::OverallAcceptanceRate => "overall_acceptance_rate",
            SortKey::DisplayName => "display_name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::TotalSolved => "Problems Solved",
            SortKey::CurrentStreak => "Current Streak",
            SortKey::OverallAcceptanceRate => "Success Rate",
            SortKey::DisplayName => "Name",
        }
    }

    /// Accepts the canonical key names plus short aliases (`solved`, `streak`, `acceptance`, `name`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "total_solved" | "solved" | "total" => Some(SortKey::TotalSolved),
            "current_streak" | "streak" => Some(SortKey::CurrentStreak),
            "overall_acceptance_rate" | "acceptance" | "rate" | "success" => {
                Some(SortKey::OverallAcceptanceRate)
            }
            "display_name" | "name" => Some(SortKey::DisplayName),
            _ => None,
        }
    }

    pub fn compare(self, left: &UserRecord, right: &UserRecord) -> Ordering {
        match self {
            SortKey::TotalSolved => right.profile.total_solved.cmp(&left.profile.total_solved),
            SortKey::CurrentStreak => right
                .consistency
                .current_streak
                .cmp(&left.consistency.current_streak),
            SortKey::OverallAcceptanceRate => right
                .profile
                .overall_acceptance_rate
                .total_cmp(&left.profile.overall_acceptance_rate),
            SortKey::DisplayName => locale_cmp(&left.display_name, &right.display_name),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable sort; records with equal keys keep their relative order.
pub fn sort_records<'a>(mut records: Vec<&'a UserRecord>, key: SortKey) -> Vec<&'a UserRecord> {
    records.sort_by(|left, right| key.compare(left, right));
    records
}

/// Name ordering that ignores case and common Latin accents first, then
/// puts unaccented before accented and lowercase before uppercase.
pub fn locale_cmp(left: &str, right: &str) -> Ordering {
    let primary = left
        .chars()
        .flat_map(fold_char)
        .cmp(right.chars().flat_map(fold_char));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = left
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase));
    if secondary != Ordering::Equal {
        return secondary;
    }

    let tertiary = left
        .chars()
        .map(|ch| ch.is_uppercase())
        .cmp(right.chars().map(|ch| ch.is_uppercase()));
    tertiary.then_with(|| left.cmp(right))
}

fn fold_char(ch: char) -> impl Iterator<Item = char> {
    ch.to_lowercase().map(strip_accent)
}

fn strip_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{SortKey, locale_cmp, sort_records};
    use crate::fixtures::record;
    use crate::model::UserRecord;

    fn ids<'a>(records: &[&'a UserRecord]) -> Vec<&'a str> {
        records.iter().map(|record| record.leetcode_id.as_str()).collect()
    }

    #[test]
    fn parses_keys_and_aliases() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("Streak"), Some(SortKey::CurrentStreak));
        assert_eq!(SortKey::parse("acceptance"), Some(SortKey::OverallAcceptanceRate));
        assert_eq!(SortKey::parse("name"), Some(SortKey::DisplayName));
        assert_eq!(SortKey::parse("karma"), None);
    }

    #[test]
    fn numeric_keys_sort_descending_and_stable() {
        let records = vec![
            record("a", 10, None, 5),
            record("b", 30, None, 5),
            record("c", 10, None, 7),
            record("d", 30, None, 1),
        ];
        let refs: Vec<&UserRecord> = records.iter().collect();

        let by_solved = sort_records(refs.clone(), SortKey::TotalSolved);
        assert_eq!(ids(&by_solved), ["b", "d", "a", "c"]);

        let by_streak = sort_records(refs, SortKey::CurrentStreak);
        assert_eq!(ids(&by_streak), ["c", "a", "b", "d"]);
    }

    #[test]
    fn acceptance_rate_sorts_descending() {
        let mut records = vec![
            record("a", 0, None, 0),
            record("b", 0, None, 0),
            record("c", 0, None, 0),
        ];
        records[0].profile.overall_acceptance_rate = 45.5;
        records[1].profile.overall_acceptance_rate = 72.25;
        records[2].profile.overall_acceptance_rate = 45.5;

        let sorted = sort_records(records.iter().collect(), SortKey::OverallAcceptanceRate);
        assert_eq!(ids(&sorted), ["b", "a", "c"]);
    }

    #[test]
    fn display_name_sorts_ascending_locale_aware() {
        let mut records = vec![
            record("1", 0, None, 0),
            record("2", 0, None, 0),
            record("3", 0, None, 0),
            record("4", 0, None, 0),
        ];
        records[0].display_name = "zoe".to_owned();
        records[1].display_name = "Émile".to_owned();
        records[2].display_name = "adam".to_owned();
        records[3].display_name = "Bob".to_owned();

        let sorted = sort_records(records.iter().collect(), SortKey::DisplayName);
        assert_eq!(ids(&sorted), ["3", "4", "2", "1"]);
    }

    #[test]
    fn equal_display_names_keep_input_order() {
        let mut records = vec![record("x", 1, None, 0), record("y", 9, None, 0)];
        records[0].display_name = "Sam".to_owned();
        records[1].display_name = "Sam".to_owned();

        let sorted = sort_records(records.iter().collect(), SortKey::DisplayName);
        assert_eq!(ids(&sorted), ["x", "y"]);

        let reversed = sort_records(records.iter().rev().collect(), SortKey::DisplayName);
        assert_eq!(ids(&reversed), ["y", "x"]);
    }

    #[test]
    fn locale_compare_breaks_ties_by_accent_then_case() {
        assert_eq!(locale_cmp("a", "B"), Ordering::Less);
        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
        assert_eq!(locale_cmp("anna", "Anna"), Ordering::Less);
        assert_eq!(locale_cmp("Anna", "anna"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn two_user_scenario_orders_by_total_solved() {
        let records = vec![record("a", 10, None, 3), record("b", 20, None, 1)];
        let sorted = sort_records(records.iter().collect(), SortKey::TotalSolved);
        assert_eq!(ids(&sorted), ["b", "a"]);
    }
}
