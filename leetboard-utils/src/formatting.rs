use leetboard_analytics::SkillLevel;

/// Group digits in thousands (e.g. 1234567 -> "1,234,567").
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Percentage with one decimal place (e.g. 61.46 -> "61.5%").
pub fn format_percent(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.1}%", value)
}

pub fn skill_label(level: Option<SkillLevel>) -> &'static str {
    match level {
        Some(level) => level.as_str(),
        None => "Unclassified",
    }
}

pub fn skill_emoji(level: Option<SkillLevel>) -> &'static str {
    match level {
        Some(SkillLevel::Beginner) => "🟢",
        Some(SkillLevel::Intermediate) => "🟡",
        Some(SkillLevel::Advanced) => "🔴",
        Some(SkillLevel::Expert) => "🟣",
        None => "⚪",
    }
}

/// Text progress bar; `percent` is clamped to 0..=100.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let width = width.max(1);
    let percent = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((percent / 100.0) * width as f64).round() as usize;

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Podium marker for a 1-based leaderboard position.
pub fn rank_marker(position: usize) -> String {
    match position {
        1 => "🥇".to_owned(),
        2 => "🥈".to_owned(),
        3 => "🥉".to_owned(),
        other => format!("#{}", other),
    }
}

/// Neutralize mentions in user-controlled text.
pub fn sanitize_mentions(raw: &str) -> String {
    raw.replace('@', "@\u{200B}")
}

/// Longest user-supplied text shown inline before it is cut with an ellipsis.
pub const MAX_INLINE_CHARS: usize = 32;

/// Cut `raw` to at most `max_chars` characters, ending with `…` when shortened.
pub fn truncate_chars(raw: &str, max_chars: usize) -> String {
    if raw.chars().count() <= max_chars {
        return raw.to_owned();
    }

    let kept: String = raw.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Escape Discord markdown and mentions in user-controlled text, capped in length.
pub fn escape_markdown(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for ch in truncate_chars(raw.trim(), MAX_INLINE_CHARS).chars() {
        if matches!(ch, '\\' | '*' | '_' | '~' | '`' | '|' | '>' | '#' | '[' | ']') {
            out.push('\\');
        }
        out.push(ch);
    }

    sanitize_mentions(&out)
}

/// Inline code span for user text; backticks are dropped.
pub fn code_span(raw: &str) -> String {
    let cleaned: String = raw.trim().chars().filter(|ch| *ch != '`').collect();
    format!("`{}`", truncate_chars(&cleaned, MAX_INLINE_CHARS))
}

/// Display name, or the LeetCode id when the name is blank.
pub fn display_name_or_id<'a>(display_name: &'a str, leetcode_id: &'a str) -> &'a str {
    let trimmed = display_name.trim();
    if trimmed.is_empty() { leetcode_id } else { trimmed }
}

/// Format seconds into a compact human-readable duration (e.g. 59s, 1m, 1h 30m, 1d).
pub fn format_compact_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        return if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        };
    }

    if hours > 0 {
        return if minutes > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}h", hours)
        };
    }

    if minutes > 0 {
        return if seconds > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}m", minutes)
        };
    }

    format!("{}s", seconds)
}

#[cfg(test)]
mod tests {
    use leetboard_analytics::SkillLevel;

    use super::{
        MAX_INLINE_CHARS, code_span, display_name_or_id, escape_markdown, format_compact_duration,
        format_percent, format_thousands, progress_bar, rank_marker, sanitize_mentions,
        skill_label, truncate_chars,
    };

    #[test]
    fn groups_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn percent_uses_one_decimal() {
        assert_eq!(format_percent(61.46), "61.5%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(f64::NAN), "0.0%");
    }

    #[test]
    fn progress_bar_caps_at_full_width() {
        assert_eq!(progress_bar(50.0, 10), "█████░░░░░");
        assert_eq!(progress_bar(250.0, 4), "████");
        assert_eq!(progress_bar(-3.0, 4), "░░░░");
    }

    #[test]
    fn labels_unclassified_skill() {
        assert_eq!(skill_label(Some(SkillLevel::Advanced)), "Advanced");
        assert_eq!(skill_label(None), "Unclassified");
    }

    #[test]
    fn podium_then_numbers() {
        assert_eq!(rank_marker(1), "🥇");
        assert_eq!(rank_marker(3), "🥉");
        assert_eq!(rank_marker(4), "#4");
    }

    #[test]
    fn mentions_are_neutralized() {
        assert_eq!(sanitize_mentions("@everyone"), "@\u{200B}everyone");
    }

    #[test]
    fn markdown_in_names_is_escaped() {
        assert_eq!(escape_markdown("*bold* _x_"), "\\*bold\\* \\_x\\_");
        assert_eq!(escape_markdown("a`b"), "a\\`b");
        assert_eq!(escape_markdown("@here"), "@\u{200B}here");
    }

    #[test]
    fn long_text_is_truncated() {
        assert_eq!(truncate_chars("abcdef", 4), "abc…");
        assert_eq!(truncate_chars("abc", 4), "abc");
        let long = "n".repeat(100);
        assert_eq!(escape_markdown(&long).chars().count(), MAX_INLINE_CHARS);
    }

    #[test]
    fn code_spans_drop_backticks() {
        assert_eq!(code_span(" a`b "), "`ab`");
    }

    #[test]
    fn blank_names_fall_back_to_id() {
        assert_eq!(display_name_or_id("  ", "alice"), "alice");
        assert_eq!(display_name_or_id("Alice", "alice"), "Alice");
    }

    #[test]
    fn compact_duration_formatting() {
        assert_eq!(format_compact_duration(59), "59s");
        assert_eq!(format_compact_duration(61), "1m 1s");
        assert_eq!(format_compact_duration(3660), "1h 1m");
        assert_eq!(format_compact_duration(86400), "1d");
        assert_eq!(format_compact_duration(90000), "1d 1h");
    }
}
