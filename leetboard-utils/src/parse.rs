use leetboard_analytics::{SkillFilter, SortKey, ViewQuery};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardArgs {
    pub query: ViewQuery,
    pub page: usize,
    /// Human-readable notes about ignored or defaulted tokens.
    pub notes: Vec<String>,
}

/// Parse `!leaderboard` arguments.
///
/// Recognized tokens are `skill:<level|all>`, `sort:<key>` and `page:<n>`
/// (`=` also works as separator); every other word joins the search term.
pub fn parse_leaderboard_args(raw: &str) -> LeaderboardArgs {
    let mut query = ViewQuery::default();
    let mut page = 1;
    let mut notes = Vec::new();
    let mut search_words = Vec::new();

    for token in raw.split_whitespace() {
        let Some((key, value)) = token.split_once([':', '=']) else {
            search_words.push(token);
            continue;
        };

        match key.to_ascii_lowercase().as_str() {
            "skill" | "level" => query.skill = SkillFilter::parse(value),
            "sort" | "by" => match SortKey::parse(value) {
                Some(sort) => query.sort = sort,
                None => notes.push(format!(
                    "Unknown sort `{}`, using `{}`.",
                    value,
                    SortKey::default()
                )),
            },
            "page" => match value.parse::<usize>() {
                Ok(parsed) if parsed >= 1 => page = parsed,
                _ => notes.push(format!("Invalid page `{}`, showing page 1.", value)),
            },
            _ => search_words.push(token),
        }
    }

    query.search = search_words.join(" ");

    LeaderboardArgs { query, page, notes }
}

/// Split a leading `skill:<level>` token off a free-text search.
pub fn split_skill_prefix(raw: &str) -> (SkillFilter, String) {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or_default();

    match first.split_once([':', '=']) {
        Some((key, value)) if key.eq_ignore_ascii_case("skill") || key.eq_ignore_ascii_case("level") => (
            SkillFilter::parse(value),
            parts.next().unwrap_or_default().trim().to_owned(),
        ),
        _ => (SkillFilter::All, trimmed.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use leetboard_analytics::{SkillFilter, SkillLevel, SortKey};

    use super::{parse_leaderboard_args, split_skill_prefix};

    #[test]
    fn empty_input_uses_defaults() {
        let args = parse_leaderboard_args("");
        assert_eq!(args.query.search, "");
        assert_eq!(args.query.skill, SkillFilter::All);
        assert_eq!(args.query.sort, SortKey::TotalSolved);
        assert_eq!(args.page, 1);
        assert!(args.notes.is_empty());
    }

    #[test]
    fn parses_options_and_search_words_in_any_order() {
        let args = parse_leaderboard_args("stanford skill:expert university sort=streak page:2");
        assert_eq!(args.query.search, "stanford university");
        assert_eq!(args.query.skill, SkillFilter::Level(SkillLevel::Expert));
        assert_eq!(args.query.sort, SortKey::CurrentStreak);
        assert_eq!(args.page, 2);
    }

    #[test]
    fn unknown_skill_is_kept_so_nothing_matches() {
        let args = parse_leaderboard_args("skill:wizard");
        assert_eq!(args.query.skill, SkillFilter::Unknown("wizard".to_owned()));
    }

    #[test]
    fn bad_sort_and_page_fall_back_with_notes() {
        let args = parse_leaderboard_args("sort:karma page:0");
        assert_eq!(args.query.sort, SortKey::TotalSolved);
        assert_eq!(args.page, 1);
        assert_eq!(args.notes.len(), 2);
    }

    #[test]
    fn unrecognized_key_value_tokens_are_search_words() {
        let args = parse_leaderboard_args("c++:fan");
        assert_eq!(args.query.search, "c++:fan");
    }

    #[test]
    fn splits_leading_skill_token() {
        assert_eq!(
            split_skill_prefix("skill:advanced mit"),
            (SkillFilter::Level(SkillLevel::Advanced), "mit".to_owned())
        );
        assert_eq!(split_skill_prefix("  mit  "), (SkillFilter::All, "mit".to_owned()));
        assert_eq!(
            split_skill_prefix("level:beginner"),
            (SkillFilter::Level(SkillLevel::Beginner), String::new())
        );
    }
}
