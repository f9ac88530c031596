use leetboard_analytics::compute_stats;
use leetboard_core::{Context, Error};
use leetboard_utils::embed::build_embed;

use crate::CommandMeta;
use crate::dashboard::embeds::{origin_color, origin_note, stats_description};

pub const META: CommandMeta = CommandMeta {
    name: "stats",
    desc: "Summary of the whole leaderboard.",
    category: "dashboard",
    usage: "!stats",
};

#[poise::command(prefix_command, slash_command, category = "Dashboard")]
pub async fn stats(ctx: Context<'_>) -> Result<(), Error> {
    let snapshot = ctx.data().store.current().await;
    let stats = compute_stats(&snapshot.records);

    let embed = build_embed(
        "Leaderboard Summary",
        stats_description(&stats),
        origin_color(&snapshot),
        Some(&origin_note(&snapshot)),
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
