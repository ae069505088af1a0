//! Help command handler.

use crate::bot::dispatcher::AppState;
use crate::i18n::get_text;
use crate::platform::Outgoing;

use super::{CommandInput, CommandResult, reply};

/// Handle /help command - HTML guide to every command.
pub async fn help_command(state: &AppState, input: &CommandInput) -> CommandResult {
    reply(state, input, Outgoing::html(get_text("help.text"))).await
}
