/// Embed builders and colors shared across commands.
pub mod embed;
/// Number, percentage and skill formatting.
pub mod formatting;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Page math and button pagination.
pub mod pagination;
/// Command argument parsing.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
/// Shared time helpers.
pub mod time;
