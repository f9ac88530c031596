use leetboard_analytics::{skill_distribution, top_performers};
use leetboard_core::{Context, Error};
use leetboard_utils::embed::build_embed;

use crate::CommandMeta;
use crate::dashboard::embeds::{origin_color, origin_note, skills_description};

pub const META: CommandMeta = CommandMeta {
    name: "skills",
    desc: "Skill level distribution and the top performers.",
    category: "dashboard",
    usage: "!skills",
};

const TOP_PERFORMERS: usize = 5;

#[poise::command(prefix_command, slash_command, category = "Dashboard")]
pub async fn skills(ctx: Context<'_>) -> Result<(), Error> {
    let snapshot = ctx.data().store.current().await;
    let shares = skill_distribution(&snapshot.records);
    let top = top_performers(&snapshot.records, TOP_PERFORMERS);

    let embed = build_embed(
        "Skill Breakdown",
        skills_description(&shares, &top),
        origin_color(&snapshot),
        Some(&origin_note(&snapshot)),
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
