//! Filter event handler.
//!
//! Handles incoming messages and checks for filter triggers.

use tracing::{debug, info, warn};

use super::IncomingMessage;
use crate::bot::dispatcher::AppState;
use crate::platform::{Outgoing, PlatformError};

/// Reply with the first filter whose trigger occurs in the message.
///
/// Returns whether a filter fired.
pub async fn check_filters(state: &AppState, msg: &IncomingMessage) -> Result<bool, PlatformError> {
    let Some(text) = msg.text.as_deref().filter(|t| !t.is_empty()) else {
        return Ok(false);
    };

    // Ignore commands
    if msg.is_command() {
        return Ok(false);
    }

    let Some(entry) = state.settings(msg.chat).matching_filter(text) else {
        return Ok(false);
    };

    debug!("Filter '{}' matched in chat {}", entry.trigger, msg.chat);

    if let Err(e) = state.platform.send_typing(msg.chat).await {
        warn!("Failed to send typing action in chat {}: {}", msg.chat, e);
    }
    state
        .platform
        .reply_message(msg.chat, msg.id, Outgoing::plain(entry.reply.as_str()))
        .await?;

    info!("Filter '{}' applied in chat {}", entry.trigger, msg.chat);
    Ok(true)
}
