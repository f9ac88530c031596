use std::fmt::Write as _;

use leetboard_analytics::{SkillShare, SortKey, SummaryStats, UserRecord, top_languages};
use leetboard_database::{AttemptOutcome, Origin, Snapshot};
use leetboard_utils::embed::{DEFAULT_EMBED_COLOR, WARNING_EMBED_COLOR};
use leetboard_utils::formatting::{
    code_span, display_name_or_id, escape_markdown, format_percent, format_thousands,
    progress_bar, rank_marker, skill_emoji, skill_label,
};
use leetboard_utils::time::format_age;

const DIFFICULTY_BAR_WIDTH: usize = 10;
const PROFILE_LANGUAGES: usize = 3;

pub fn no_data_message() -> &'static str {
    "No leaderboard data is loaded right now. An admin can try `!reload`."
}

/// Embed color for anything rendered from `snapshot`.
pub fn origin_color(snapshot: &Snapshot) -> u32 {
    match snapshot.origin {
        Origin::Source(_) => DEFAULT_EMBED_COLOR,
        Origin::Fallback => WARNING_EMBED_COLOR,
    }
}

pub fn origin_note(snapshot: &Snapshot) -> String {
    format!("source: {} • v{}", snapshot.origin, snapshot.version)
}

fn name_of(record: &UserRecord) -> String {
    escape_markdown(display_name_or_id(&record.display_name, &record.leetcode_id))
}

pub fn stats_description(stats: &SummaryStats<'_>) -> String {
    let top = match stats.top_performer {
        Some(record) => format!(
            "{} ({} solved)",
            name_of(record),
            format_thousands(record.profile.total_solved)
        ),
        None => "nobody yet".to_owned(),
    };

    format!(
        "**Total users:** {}\n**Average solved:** {}\n**Top performer:** {}\n**Active this week:** {}",
        format_thousands(stats.total_users as u64),
        format_thousands(stats.average_solved),
        top,
        format_thousands(stats.active_users as u64),
    )
}

/// The metric a leaderboard row highlights for the active sort.
fn sort_metric(record: &UserRecord, sort: SortKey) -> String {
    match sort {
        SortKey::TotalSolved | SortKey::DisplayName => {
            format!("{} solved", format_thousands(record.profile.total_solved))
        }
        SortKey::CurrentStreak => format!("🔥 {}d streak", record.consistency.current_streak),
        SortKey::OverallAcceptanceRate => format!(
            "{} acceptance",
            format_percent(record.profile.overall_acceptance_rate)
        ),
    }
}

/// One line per record; `first_rank` is the 1-based position of `records[0]`.
pub fn leaderboard_lines(records: &[&UserRecord], first_rank: usize, sort: SortKey) -> String {
    let mut out = String::new();

    for (offset, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} **{}** ({}) • {} • {} {}",
            rank_marker(first_rank + offset),
            name_of(record),
            code_span(&record.leetcode_id),
            sort_metric(record, sort),
            skill_emoji(record.analysis.skill_level),
            skill_label(record.analysis.skill_level),
        );
    }

    out.trim_end().to_owned()
}

pub fn no_matches_message(search: &str) -> String {
    if search.is_empty() {
        "No users match that skill level.".to_owned()
    } else {
        format!("No users match {}.", code_span(search))
    }
}

pub fn profile_title(record: &UserRecord) -> String {
    format!(
        "{} {}",
        skill_emoji(record.analysis.skill_level),
        name_of(record)
    )
}

pub fn profile_description(record: &UserRecord) -> String {
    let profile = &record.profile;
    let analysis = &record.analysis;
    let consistency = &record.consistency;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "**{}** • {} solved • {} success rate",
        skill_label(analysis.skill_level),
        format_thousands(profile.total_solved),
        format_percent(profile.overall_acceptance_rate),
    );
    let _ = writeln!(
        out,
        "🔥 {}d current streak • {}d best • {} active days • {} this week",
        consistency.current_streak,
        consistency.max_streak,
        consistency.total_days_active,
        consistency.recent_activity.last_7_days,
    );

    out.push('\n');
    for (label, breakdown) in [
        ("Easy", &analysis.easy),
        ("Medium", &analysis.medium),
        ("Hard", &analysis.hard),
    ] {
        let completion = breakdown.completion.clamp(0.0, 100.0);
        let _ = writeln!(
            out,
            "`{:<6}` {} {} • {} solved",
            label,
            progress_bar(completion, DIFFICULTY_BAR_WIDTH),
            format_percent(completion),
            format_thousands(breakdown.solved),
        );
    }

    let languages = top_languages(record, PROFILE_LANGUAGES);
    if !languages.is_empty() {
        let listed = languages
            .iter()
            .map(|(name, count)| format!("{} ({})", escape_markdown(name), format_thousands(*count)))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "\n**Languages:** {}", listed);
    }

    let mut details = Vec::new();
    if let Some(company) = profile.company.as_deref() {
        details.push(format!("**Company:** {}", escape_markdown(company)));
    }
    if let Some(school) = record.school() {
        details.push(format!("**School:** {}", escape_markdown(school)));
    }
    if let Some(stars) = profile.star_rating {
        details.push(format!("**Stars:** {:.1}", stars));
    }
    if let Some(ranking) = profile.ranking {
        details.push(format!("**Ranking:** #{}", format_thousands(ranking)));
    }
    if !details.is_empty() {
        out.push('\n');
        out.push_str(&details.join("\n"));
        out.push('\n');
    }

    let _ = write!(out, "\n{}", record.profile_url());
    out
}

pub fn skills_description(shares: &[SkillShare], top: &[&UserRecord]) -> String {
    let mut out = String::from("**Skill distribution**\n");

    for share in shares {
        let _ = writeln!(
            out,
            "{} {} • {} ({})",
            skill_emoji(Some(share.level)),
            share.level,
            format_thousands(share.count as u64),
            format_percent(share.percentage),
        );
    }

    out.push_str("\n**Top performers**\n");
    if top.is_empty() {
        out.push_str("Nobody yet.");
    } else {
        out.push_str(&leaderboard_lines(top, 1, SortKey::TotalSolved));
    }

    out
}

fn attempt_line(outcome: &AttemptOutcome) -> String {
    match outcome {
        AttemptOutcome::Loaded { records, rejected } => {
            format!("loaded {} record(s), {} rejected", records, rejected)
        }
        AttemptOutcome::Empty { rejected } => {
            format!("no usable records, {} rejected", rejected)
        }
        AttemptOutcome::Failed(reason) => format!("failed: {}", reason),
    }
}

pub fn source_description(snapshot: &Snapshot, now: u64) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "**Origin:** {}", snapshot.origin);
    let _ = writeln!(out, "**Version:** {}", snapshot.version);
    let _ = writeln!(out, "**Loaded:** {}", format_age(snapshot.loaded_at, now));
    let _ = writeln!(
        out,
        "**Records:** {} • **Rejected:** {}",
        format_thousands(snapshot.records.len() as u64),
        format_thousands(snapshot.rejected.len() as u64),
    );

    if !snapshot.attempts.is_empty() {
        out.push_str("\n**Attempts**\n");
        for (index, attempt) in snapshot.attempts.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. `{}`: {}",
                index + 1,
                attempt.source,
                attempt_line(&attempt.outcome)
            );
        }
    }

    out.trim_end().to_owned()
}
