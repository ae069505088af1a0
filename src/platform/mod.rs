//! Messaging platform boundary.
//!
//! Handlers never talk to teloxide directly. They go through [`Platform`],
//! which takes and returns the plain data types defined here, so every
//! handler can be exercised against a recording fake in tests.

#[cfg(test)]
pub mod mock;
mod telegram;

use async_trait::async_trait;
use teloxide::types::{ChatId, MessageId, UserId};
use thiserror::Error;

use crate::utils::html_escape;

pub use telegram::TelegramPlatform;

/// A failed platform call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform rejected the request (missing rights, user left, ...).
    #[error("{0}")]
    Api(String),

    /// A kick banned the user but the unban that should follow failed, so
    /// the user stays banned.
    #[error("user is still banned, unban failed: {0}")]
    StillBanned(String),

    /// Transport level failure or anything else that kept the request
    /// from completing.
    #[error("{0}")]
    Request(String),
}

/// How the text of an outgoing message is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

/// An outgoing text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub text: String,
    pub format: TextFormat,
    pub reply_to: Option<MessageId>,
    pub link_preview: bool,
}

impl Outgoing {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
            reply_to: None,
            link_preview: true,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            format: TextFormat::Html,
            ..Self::plain(text)
        }
    }

    #[must_use]
    pub fn reply_to(mut self, message: MessageId) -> Self {
        self.reply_to = Some(message);
        self
    }

    #[must_use]
    pub fn without_preview(mut self) -> Self {
        self.link_preview = false;
        self
    }
}

/// A platform user as seen by the handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: UserId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub is_bot: bool,
}

impl UserRef {
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// HTML link that mentions the user by full name.
    pub fn mention_html(&self) -> String {
        format!(
            "<a href=\"tg://user?id={}\">{}</a>",
            self.id,
            html_escape(&self.full_name())
        )
    }
}

/// Membership state of a user in a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberStatus {
    /// Whether the user takes part in the chat as a regular participant.
    pub fn is_participant(self) -> bool {
        matches!(self, Self::Owner | Self::Administrator | Self::Member)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Owner | Self::Administrator)
    }
}

/// Result of a member lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMember {
    pub user: UserRef,
    pub status: MemberStatus,
}

/// Result of a chat lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatInfo {
    pub pinned: Option<PinnedMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedMessage {
    pub id: MessageId,
    /// Text or caption; `None` for media without caption.
    pub text: Option<String>,
}

/// Operations the bot needs from the messaging platform.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn send_message(&self, chat: ChatId, message: Outgoing) -> Result<MessageId, PlatformError>;

    /// Reply to `to` in the same chat.
    async fn reply_message(
        &self,
        chat: ChatId,
        to: MessageId,
        message: Outgoing,
    ) -> Result<MessageId, PlatformError> {
        self.send_message(chat, message.reply_to(to)).await
    }

    /// Show the "typing" chat action.
    async fn send_typing(&self, chat: ChatId) -> Result<(), PlatformError>;

    async fn pin_message(&self, chat: ChatId, message: MessageId, notify: bool) -> Result<(), PlatformError>;

    /// Unpin `message`, or the most recent pin if `None`.
    async fn unpin_message(&self, chat: ChatId, message: Option<MessageId>) -> Result<(), PlatformError>;

    async fn unpin_all(&self, chat: ChatId) -> Result<(), PlatformError>;

    /// Remove a member without banning them.
    ///
    /// Fails with [`PlatformError::StillBanned`] when only the ban half
    /// went through.
    async fn kick_member(&self, chat: ChatId, user: UserId) -> Result<(), PlatformError>;

    async fn ban_member(&self, chat: ChatId, user: UserId) -> Result<(), PlatformError>;

    async fn unban_member(&self, chat: ChatId, user: UserId) -> Result<(), PlatformError>;

    /// Ids of the chat's administrators, owner included.
    async fn chat_admins(&self, chat: ChatId) -> Result<Vec<UserId>, PlatformError>;

    async fn chat_member(&self, chat: ChatId, user: UserId) -> Result<ChatMember, PlatformError>;

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), PlatformError>;

    async fn get_chat(&self, chat: ChatId) -> Result<ChatInfo, PlatformError>;
}
