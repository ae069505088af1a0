//! Activity tracking.

use tracing::debug;

use super::IncomingMessage;
use crate::bot::dispatcher::AppState;

/// Count the message towards its sender's activity.
///
/// Commands, bots and messages sent on behalf of a chat are not counted.
pub fn track_activity(state: &AppState, msg: &IncomingMessage) {
    if msg.is_command() || msg.has_sender_chat {
        return;
    }

    let Some(user) = msg.from.as_ref().filter(|u| !u.is_bot) else {
        return;
    };

    let count = state.settings(msg.chat).record_activity(user.id);
    debug!("Tracked activity of {} in chat {}: {}", user.id, msg.chat, count);
}
