//! Protection toggles enforcement.
//!
//! Each step returns whether it deleted the message.

use tracing::info;

use super::IncomingMessage;
use crate::bot::dispatcher::AppState;
use crate::platform::PlatformError;
use crate::store::Toggle;

/// Delete messages of other bots when `nobots` is on.
pub async fn remove_foreign_bot(state: &AppState, msg: &IncomingMessage) -> Result<bool, PlatformError> {
    let Some(sender) = msg.from.as_ref().filter(|u| u.is_bot && u.id != state.bot_id) else {
        return Ok(false);
    };

    if !state.settings(msg.chat).toggle(Toggle::NoBots) {
        return Ok(false);
    }

    state.platform.delete_message(msg.chat, msg.id).await?;
    info!("Deleted a message from bot {} in chat {}", sender.id, msg.chat);
    Ok(true)
}

/// Delete automatic forwards from the linked channel when `cleanlinked` is on.
pub async fn remove_linked_forward(
    state: &AppState,
    msg: &IncomingMessage,
) -> Result<bool, PlatformError> {
    if !msg.is_automatic_forward || !state.settings(msg.chat).toggle(Toggle::CleanLinked) {
        return Ok(false);
    }

    state.platform.delete_message(msg.chat, msg.id).await?;
    info!("Deleted linked channel message {} in chat {}", msg.id.0, msg.chat);
    Ok(true)
}

/// Unpin automatic channel forwards when `antichannelpin` is on.
///
/// The platform does not say whether the forward was pinned, so every such
/// forward is unpinned.
pub async fn unpin_channel_forward(state: &AppState, msg: &IncomingMessage) -> Result<(), PlatformError> {
    if !(msg.is_automatic_forward && msg.from_channel)
        || !state.settings(msg.chat).toggle(Toggle::AntiChannelPin)
    {
        return Ok(());
    }

    state.platform.unpin_message(msg.chat, Some(msg.id)).await?;
    info!(
        "Unpinned automatically forwarded message {} in chat {}",
        msg.id.0, msg.chat
    );
    Ok(())
}
