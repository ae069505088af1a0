//! Event handler system.
//!
//! Add new event handlers by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_event;` below
//! 3. Calling it from `process_message()` or `process_member_update()`

pub mod activity;
pub mod filters;
pub mod protection;
pub mod welcome;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ChatMemberUpdated, MessageId};
use tracing::{debug, error};

use crate::bot::dispatcher::AppState;
use crate::platform::{MemberStatus, UserRef};

/// A chat message as seen by the moderation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat: ChatId,
    pub id: MessageId,
    pub from: Option<UserRef>,
    /// Sent on behalf of a chat (anonymous admin or channel).
    pub has_sender_chat: bool,
    /// The sender chat is a channel.
    pub from_channel: bool,
    /// Forwarded automatically from the linked channel.
    pub is_automatic_forward: bool,
    /// Text or caption.
    pub text: Option<String>,
}

impl IncomingMessage {
    pub fn is_command(&self) -> bool {
        self.text.as_deref().is_some_and(|t| t.starts_with('/'))
    }
}

impl From<&Message> for IncomingMessage {
    fn from(msg: &Message) -> Self {
        let sender_chat = msg.sender_chat.as_ref();

        Self {
            chat: msg.chat.id,
            id: msg.id,
            from: msg.from.as_ref().map(UserRef::from),
            has_sender_chat: sender_chat.is_some(),
            from_channel: sender_chat.is_some_and(|chat| chat.is_channel()),
            is_automatic_forward: msg.is_automatic_forward(),
            text: msg.text().or_else(|| msg.caption()).map(String::from),
        }
    }
}

/// A membership change of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberUpdate {
    pub chat: ChatId,
    pub user: UserRef,
    pub old: MemberStatus,
    pub new: MemberStatus,
}

impl MemberUpdate {
    /// The user just became a participant.
    pub fn is_join(&self) -> bool {
        !self.old.is_participant() && self.new.is_participant()
    }

    pub fn touches_admin_role(&self) -> bool {
        self.old.is_admin() || self.new.is_admin()
    }
}

impl From<&ChatMemberUpdated> for MemberUpdate {
    fn from(update: &ChatMemberUpdated) -> Self {
        Self {
            chat: update.chat.id,
            user: UserRef::from(&update.new_chat_member.user),
            old: MemberStatus::from(&update.old_chat_member.kind),
            new: MemberStatus::from(&update.new_chat_member.kind),
        }
    }
}

/// Build the combined event handler for chat member updates.
pub fn event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::endpoint(handle_member_update)
}

/// Build the message event handler.
///
/// Runs the whole moderation pipeline for every group message that was not
/// consumed by a command handler.
pub fn message_event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message| msg.chat.is_group() || msg.chat.is_supergroup())
        .endpoint(handle_message)
}

async fn handle_message(msg: Message, state: AppState) -> anyhow::Result<()> {
    process_message(&state, &IncomingMessage::from(&msg)).await;
    Ok(())
}

async fn handle_member_update(update: ChatMemberUpdated, state: AppState) -> anyhow::Result<()> {
    process_member_update(&state, &MemberUpdate::from(&update)).await;
    Ok(())
}

/// Run every message step in order.
///
/// Each step's failure is logged and does not stop the others. A message
/// deleted by a protection step goes no further.
pub async fn process_message(state: &AppState, msg: &IncomingMessage) {
    debug!(
        "Processing message {} in chat {}, command={}",
        msg.id.0,
        msg.chat,
        msg.is_command()
    );

    match protection::remove_foreign_bot(state, msg).await {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => error!("Anti-bot protection failed in chat {}: {}", msg.chat, e),
    }

    match protection::remove_linked_forward(state, msg).await {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => error!("Linked channel cleanup failed in chat {}: {}", msg.chat, e),
    }

    if let Err(e) = protection::unpin_channel_forward(state, msg).await {
        error!("Anti-channel pin failed in chat {}: {}", msg.chat, e);
    }

    activity::track_activity(state, msg);

    if let Err(e) = filters::check_filters(state, msg).await {
        error!("Filters error in chat {}: {}", msg.chat, e);
    }
}

/// React to a membership change.
pub async fn process_member_update(state: &AppState, update: &MemberUpdate) {
    if update.touches_admin_role() {
        state.permissions.invalidate(update.chat);
    }

    if update.is_join()
        && let Err(e) = welcome::welcome_new_member(state, update).await
    {
        error!("Failed to welcome user {} in chat {}: {}", update.user.id, update.chat, e);
    }
}
