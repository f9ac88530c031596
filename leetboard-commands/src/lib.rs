pub mod dashboard;
pub mod utility;

use leetboard_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    dashboard::stats::META,
    dashboard::leaderboard::META,
    dashboard::profile::META,
    dashboard::skills::META,
    dashboard::source::META,
    dashboard::reload::META,
    dashboard::livesearch::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        utility::usage::usage(),
        dashboard::stats::stats(),
        dashboard::leaderboard::leaderboard(),
        dashboard::profile::profile(),
        dashboard::skills::skills(),
        dashboard::source::source(),
        dashboard::reload::reload(),
        dashboard::livesearch::livesearch(),
    ]
}
