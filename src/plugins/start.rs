//! Start command handler.

use crate::bot::dispatcher::AppState;
use crate::i18n::get_text;
use crate::platform::Outgoing;

use super::{CommandInput, CommandResult, reply};

/// Handle /start command.
pub async fn start_command(state: &AppState, input: &CommandInput) -> CommandResult {
    reply(state, input, Outgoing::plain(get_text("start.text"))).await
}
