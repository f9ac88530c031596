use leetboard_analytics::derive_view;
use leetboard_core::{Context, Error};
use leetboard_utils::pagination::{PageDeck, page_window, paginate_embed_pages, total_pages};
use leetboard_utils::parse::parse_leaderboard_args;

use crate::CommandMeta;
use crate::dashboard::embeds::{
    leaderboard_lines, no_data_message, no_matches_message, origin_color,
};
use crate::utility::embeds::page_out_of_range_message;

pub const META: CommandMeta = CommandMeta {
    name: "leaderboard",
    desc: "Search, filter and sort the leaderboard.",
    category: "dashboard",
    usage: "!leaderboard [search] [skill:<level|all>] [sort:<solved|streak|acceptance|name>] [page:<n>]",
};

const USERS_PER_PAGE: usize = 10;

#[poise::command(
    prefix_command,
    slash_command,
    category = "Dashboard",
    aliases("lb")
)]
pub async fn leaderboard(
    ctx: Context<'_>,
    #[rest]
    #[description = "Search words plus optional skill:, sort: and page: tokens"]
    query: Option<String>,
) -> Result<(), Error> {
    let args = parse_leaderboard_args(query.as_deref().unwrap_or_default());
    let snapshot = ctx.data().store.current().await;

    if snapshot.records.is_empty() {
        ctx.say(no_data_message()).await?;
        return Ok(());
    }

    let view = derive_view(&snapshot.records, &args.query);
    if view.visible.is_empty() {
        ctx.say(no_matches_message(&args.query.search)).await?;
        return Ok(());
    }

    let total = total_pages(view.visible.len(), USERS_PER_PAGE);
    if args.page > total {
        ctx.say(page_out_of_range_message(args.page, total)).await?;
        return Ok(());
    }

    let header = args
        .notes
        .iter()
        .map(|note| format!("*{}*\n", note))
        .collect::<String>();
    let pages = (1..=total)
        .map(|page| {
            let (start, end) = page_window(view.visible.len(), USERS_PER_PAGE, page);
            format!(
                "{}{}",
                header,
                leaderboard_lines(&view.visible[start..end], start + 1, args.query.sort)
            )
        })
        .collect::<Vec<_>>();

    let footer = format!(
        "{} of {} users • skill: {} • sorted by {}",
        view.visible.len(),
        view.stats.total_users,
        args.query.skill,
        args.query.sort.label()
    );

    paginate_embed_pages(
        ctx,
        PageDeck {
            title: "Leaderboard",
            pages: &pages,
            color: origin_color(&snapshot),
            footer_note: Some(&footer),
        },
        args.page,
    )
    .await?;

    Ok(())
}
