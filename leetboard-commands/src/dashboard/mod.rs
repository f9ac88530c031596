pub(crate) mod embeds;
pub mod leaderboard;
pub mod livesearch;
pub mod profile;
pub mod reload;
pub mod skills;
pub mod source;
pub mod stats;
