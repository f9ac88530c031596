use poise::serenity_prelude as serenity;

use leetboard_analytics::SkillLevel;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0xFF_A1_16;
/// Color for failures and degraded data.
pub const WARNING_EMBED_COLOR: u32 = 0xE0_5D_44;

pub fn skill_color(level: Option<SkillLevel>) -> u32 {
    match level {
        Some(SkillLevel::Beginner) => 0x2C_BB_5D,
        Some(SkillLevel::Intermediate) => 0xFF_B8_00,
        Some(SkillLevel::Advanced) => 0xEF_47_43,
        Some(SkillLevel::Expert) => 0x8E_44_AD,
        None => 0x95_A5_A6,
    }
}

/// Footer text for a page, or `None` when there is nothing to show.
///
/// Single-page output drops the page counter and keeps only the note.
pub fn page_footer(page: usize, total_pages: usize, footer_note: Option<&str>) -> Option<String> {
    let page = page.max(1);
    let total_pages = total_pages.max(1);
    let note = footer_note.filter(|note| !note.is_empty());

    match (total_pages > 1, note) {
        (true, Some(note)) => Some(format!("Page {}/{} • {}", page, total_pages, note)),
        (true, None) => Some(format!("Page {}/{}", page, total_pages)),
        (false, Some(note)) => Some(note.to_owned()),
        (false, None) => None,
    }
}

/// Build a standard embed with consistent styling.
pub fn build_embed(
    title: &str,
    description: impl Into<String>,
    color: u32,
    footer_note: Option<&str>,
) -> serenity::CreateEmbed {
    build_paginated_embed(title, description, color, 1, 1, footer_note)
}

/// Build a standard paginated embed with an optional footer suffix.
pub fn build_paginated_embed(
    title: &str,
    description: impl Into<String>,
    color: u32,
    page: usize,
    total_pages: usize,
    footer_note: Option<&str>,
) -> serenity::CreateEmbed {
    let builder = serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(color)
        .description(description);

    match page_footer(page, total_pages, footer_note) {
        Some(text) => builder.footer(serenity::CreateEmbedFooter::new(text)),
        None => builder,
    }
}
