use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

use leetboard_analytics::{RawShape, UserRecord, ingest};
use leetboard_core::{Context, Error};
use leetboard_database::SupabaseClient;
use leetboard_utils::embed::skill_color;

use crate::CommandMeta;
use crate::dashboard::embeds::{profile_description, profile_title};
use crate::utility::embeds::usage_message;

pub const META: CommandMeta = CommandMeta {
    name: "profile",
    desc: "Show one user's LeetCode card.",
    category: "dashboard",
    usage: "!profile <leetcode_id>",
};

#[poise::command(prefix_command, slash_command, category = "Dashboard")]
pub async fn profile(
    ctx: Context<'_>,
    #[description = "LeetCode username"] leetcode_id: Option<String>,
) -> Result<(), Error> {
    let Some(leetcode_id) = leetcode_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let snapshot = ctx.data().store.current().await;
    let (record, note) = match snapshot.find(leetcode_id) {
        Some(record) => (Some(record.clone()), format!("source: {}", snapshot.origin)),
        None => match ctx.data().store.chain().supabase() {
            Some(client) => (live_lookup(client, leetcode_id).await, "source: live lookup".to_owned()),
            None => (None, String::new()),
        },
    };

    let Some(record) = record else {
        ctx.say(format!("No user found with LeetCode id `{}`.", leetcode_id))
            .await?;
        return Ok(());
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(profile_title(&record))
        .url(record.profile_url())
        .color(skill_color(record.analysis.skill_level))
        .description(profile_description(&record))
        .footer(serenity::CreateEmbedFooter::new(note));
    if let Some(avatar_url) = record.profile.avatar_url.as_deref() {
        embed = embed.thumbnail(avatar_url);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Users missing from the loaded batch may still exist upstream.
async fn live_lookup(client: &SupabaseClient, leetcode_id: &str) -> Option<UserRecord> {
    let row = match client.fetch_user_by_leetcode_id(leetcode_id).await {
        Ok(row) => row?,
        Err(err) => {
            warn!(leetcode_id, error = %format!("{err:#}"), "live profile lookup failed");
            return None;
        }
    };

    let report = ingest(vec![row], RawShape::Row);
    for rejection in &report.rejected {
        debug!(leetcode_id, reason = %rejection.reason, "live profile row rejected");
    }

    report.records.into_iter().next()
}
