use leetboard_core::{Context, Error};
use leetboard_database::now_unix_secs;
use leetboard_utils::embed::build_embed;

use crate::CommandMeta;
use crate::dashboard::embeds::{origin_color, source_description};

pub const META: CommandMeta = CommandMeta {
    name: "source",
    desc: "Where the current data came from and how each source fared.",
    category: "dashboard",
    usage: "!source",
};

#[poise::command(prefix_command, slash_command, category = "Dashboard")]
pub async fn source(ctx: Context<'_>) -> Result<(), Error> {
    let snapshot = ctx.data().store.current().await;

    let embed = build_embed(
        "Data Source",
        source_description(&snapshot, now_unix_secs()),
        origin_color(&snapshot),
        None,
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
