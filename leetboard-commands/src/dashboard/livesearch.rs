use tracing::info;

use leetboard_analytics::{RawShape, SkillFilter, ViewQuery, derive_view, ingest};
use leetboard_core::{Context, Error};
use leetboard_utils::embed::{DEFAULT_EMBED_COLOR, build_embed};
use leetboard_utils::parse::split_skill_prefix;

use crate::CommandMeta;
use crate::dashboard::embeds::{leaderboard_lines, no_matches_message};

pub const META: CommandMeta = CommandMeta {
    name: "livesearch",
    desc: "Search the live database instead of the loaded snapshot.",
    category: "dashboard",
    usage: "!livesearch [skill:<level>] <search>",
};

const LIVE_RESULTS: usize = 10;

#[poise::command(prefix_command, slash_command, category = "Dashboard")]
pub async fn livesearch(
    ctx: Context<'_>,
    #[rest]
    #[description = "Optional skill:<level> followed by search words"]
    query: Option<String>,
) -> Result<(), Error> {
    let Some(client) = ctx.data().store.chain().supabase() else {
        ctx.say("Live search is unavailable: no Supabase connection is configured.")
            .await?;
        return Ok(());
    };

    let (skill, term) = split_skill_prefix(query.as_deref().unwrap_or_default());
    let rows = if term.is_empty() {
        client.filter_by_skill_level(&skill).await?
    } else {
        client.search_users(&term).await?
    };

    let report = ingest(rows, RawShape::Row);
    info!(
        term = %term,
        skill = %skill,
        records = report.records.len(),
        rejected = report.rejected.len(),
        "live search completed"
    );

    // The server already matched the term; only the skill filter and ordering remain.
    let query = ViewQuery {
        search: String::new(),
        skill: if term.is_empty() { SkillFilter::All } else { skill },
        ..Default::default()
    };
    let view = derive_view(&report.records, &query);

    if view.visible.is_empty() {
        ctx.say(no_matches_message(&term)).await?;
        return Ok(());
    }

    let shown = view.visible.len().min(LIVE_RESULTS);
    let footer = format!("showing {} of {} live results", shown, view.visible.len());
    let embed = build_embed(
        "Live Search",
        leaderboard_lines(&view.visible[..shown], 1, query.sort),
        DEFAULT_EMBED_COLOR,
        Some(&footer),
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
