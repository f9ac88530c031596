use leetboard_core::{Context, Error};
use leetboard_utils::embed::DEFAULT_EMBED_COLOR;
use leetboard_utils::pagination::{PageDeck, page_window, paginate_embed_pages, total_pages};

use crate::utility::embeds::{
    grouped_help_description, page_out_of_range_message, unknown_category_message,
};
use crate::{COMMANDS, CommandMeta};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [page|category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 20;

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Page number or category"] query: Option<String>,
) -> Result<(), Error> {
    let query = query.as_deref().map(str::trim).filter(|raw| !raw.is_empty());
    let parsed_page = query.and_then(|raw| raw.parse::<usize>().ok().filter(|page| *page >= 1));
    let category = query.filter(|_| parsed_page.is_none());

    let categories = categories();
    if let Some(wanted) = category
        && !categories.iter().any(|known| known.eq_ignore_ascii_case(wanted))
    {
        ctx.say(unknown_category_message(wanted, &categories)).await?;
        return Ok(());
    }

    let commands = sorted_commands(category);
    let requested_page = parsed_page.unwrap_or(1);
    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);

    if requested_page > total {
        ctx.say(page_out_of_range_message(requested_page, total)).await?;
        return Ok(());
    }

    let pages = (1..=total)
        .map(|page| {
            let (start, end) = page_window(commands.len(), HELP_COMMANDS_PER_PAGE, page);
            grouped_help_description(&commands[start..end])
        })
        .collect::<Vec<_>>();

    paginate_embed_pages(
        ctx,
        PageDeck {
            title: "Available Commands",
            pages: &pages,
            color: DEFAULT_EMBED_COLOR,
            footer_note: None,
        },
        requested_page,
    )
    .await?;
    Ok(())
}

fn categories() -> Vec<&'static str> {
    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| category.is_none_or(|wanted| cmd.category.eq_ignore_ascii_case(wanted)))
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::{categories, sorted_commands};
    use crate::COMMANDS;

    #[test]
    fn every_command_is_listed_once_in_category_order() {
        let all = sorted_commands(None);
        assert_eq!(all.len(), COMMANDS.len());
        assert!(
            all.windows(2)
                .all(|pair| (pair[0].category, pair[0].name) < (pair[1].category, pair[1].name))
        );
    }

    #[test]
    fn category_lookup_ignores_case() {
        let dashboard = sorted_commands(Some("Dashboard"));
        assert!(!dashboard.is_empty());
        assert!(dashboard.iter().all(|cmd| cmd.category == "dashboard"));
        assert_eq!(categories(), vec!["dashboard", "utility"]);
    }
}
