//! Welcome event handler.
//!
//! Greets members who just joined.

use tracing::info;

use super::MemberUpdate;
use crate::bot::dispatcher::AppState;
use crate::platform::{Outgoing, PlatformError};
use crate::plugins::welcome::format_welcome;

/// Send the chat's welcome message for a new member.
pub async fn welcome_new_member(state: &AppState, update: &MemberUpdate) -> Result<(), PlatformError> {
    let template = state.settings(update.chat).welcome_message();
    let text = format_welcome(template.as_deref(), &update.user.mention_html());

    state
        .platform
        .send_message(update.chat, Outgoing::html(text))
        .await?;

    info!("Welcomed new member {} in chat {}", update.user.id, update.chat);
    Ok(())
}
