use crate::CommandMeta;

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn unknown_category_message(wanted: &str, valid: &[&str]) -> String {
    let valid = valid
        .iter()
        .map(|category| capitalize(category))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Unknown category: {}\nValid categories: {}",
        capitalize(wanted),
        valid
    )
}

pub fn page_out_of_range_message(requested_page: usize, total_pages: usize) -> String {
    format!(
        "Page {} does not exist. Available pages: 1-{}.",
        requested_page, total_pages
    )
}

/// Commands grouped under bold category headers; input must be sorted by category.
pub fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", capitalize(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!("`{}`: {}\n", command.name, command.desc));
    }

    if out.is_empty() {
        return "No commands available.".to_owned();
    }

    out.trim_end().to_owned()
}

fn capitalize(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{grouped_help_description, unknown_category_message};
    use crate::CommandMeta;

    const STATS: CommandMeta = CommandMeta {
        name: "stats",
        desc: "Summary.",
        category: "dashboard",
        usage: "!stats",
    };
    const PING: CommandMeta = CommandMeta {
        name: "ping",
        desc: "Pong.",
        category: "utility",
        usage: "!ping",
    };

    #[test]
    fn groups_commands_by_category() {
        let text = grouped_help_description(&[&STATS, &PING]);
        assert_eq!(
            text,
            "**Dashboard**\n`stats`: Summary.\n\n**Utility**\n`ping`: Pong."
        );
        assert_eq!(grouped_help_description(&[]), "No commands available.");
    }

    #[test]
    fn unknown_category_lists_valid_ones() {
        assert_eq!(
            unknown_category_message("fun", &["dashboard", "utility"]),
            "Unknown category: Fun\nValid categories: Dashboard, Utility"
        );
    }
}
