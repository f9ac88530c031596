use poise::serenity_prelude as serenity;
use tracing::info;

use leetboard_core::{Context, Error};
use leetboard_database::now_unix_secs;
use leetboard_utils::embed::build_embed;
use leetboard_utils::permissions::has_user_permission;

use crate::CommandMeta;
use crate::dashboard::embeds::{origin_color, source_description};
use crate::utility::embeds::guild_only_message;

pub const META: CommandMeta = CommandMeta {
    name: "reload",
    desc: "Reload leaderboard data from the configured sources.",
    category: "dashboard",
    usage: "!reload",
};

#[poise::command(prefix_command, slash_command, category = "Dashboard")]
pub async fn reload(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::MANAGE_GUILD,
    )
    .await?
    {
        ctx.say("You need the Manage Server permission to reload data.")
            .await?;
        return Ok(());
    }

    ctx.defer().await?;
    info!(user_id = ctx.author().id.get(), guild_id = guild_id.get(), "manual reload requested");

    let snapshot = ctx.data().store.reload(true).await;
    let embed = build_embed(
        "Data Reloaded",
        source_description(&snapshot, now_unix_secs()),
        origin_color(&snapshot),
        None,
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
