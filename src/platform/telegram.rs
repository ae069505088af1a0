//! Telegram implementation of [`Platform`] on top of teloxide.

use async_trait::async_trait;
use teloxide::RequestError;
use teloxide::prelude::*;
use teloxide::types::{
    ChatAction, ChatId, ChatMemberKind, LinkPreviewOptions, MessageId, ParseMode, ReplyParameters,
    User, UserId,
};

use super::{
    ChatInfo, ChatMember, MemberStatus, Outgoing, PinnedMessage, Platform, PlatformError,
    TextFormat, UserRef,
};
use tracing::error;

use crate::bot::dispatcher::ThrottledBot;

impl From<RequestError> for PlatformError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Api(api) => Self::Api(api.to_string()),
            other => Self::Request(other.to_string()),
        }
    }
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_bot: user.is_bot,
        }
    }
}

impl From<&ChatMemberKind> for MemberStatus {
    fn from(kind: &ChatMemberKind) -> Self {
        if kind.is_owner() {
            Self::Owner
        } else if kind.is_administrator() {
            Self::Administrator
        } else if kind.is_member() {
            Self::Member
        } else if kind.is_restricted() {
            Self::Restricted
        } else if kind.is_banned() {
            Self::Banned
        } else {
            Self::Left
        }
    }
}

impl From<&teloxide::types::ChatMember> for ChatMember {
    fn from(member: &teloxide::types::ChatMember) -> Self {
        Self {
            user: UserRef::from(&member.user),
            status: MemberStatus::from(&member.kind),
        }
    }
}

/// Platform backed by the throttled Telegram bot.
#[derive(Clone)]
pub struct TelegramPlatform {
    bot: ThrottledBot,
}

impl TelegramPlatform {
    pub fn new(bot: ThrottledBot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Platform for TelegramPlatform {
    async fn send_message(&self, chat: ChatId, message: Outgoing) -> Result<MessageId, PlatformError> {
        let mut request = self.bot.send_message(chat, message.text);

        if message.format == TextFormat::Html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(reply_to) = message.reply_to {
            request = request.reply_parameters(ReplyParameters::new(reply_to));
        }
        if !message.link_preview {
            request = request.link_preview_options(LinkPreviewOptions {
                is_disabled: true,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            });
        }

        let sent = request.await?;
        Ok(sent.id)
    }

    async fn send_typing(&self, chat: ChatId) -> Result<(), PlatformError> {
        self.bot.send_chat_action(chat, ChatAction::Typing).await?;
        Ok(())
    }

    async fn pin_message(&self, chat: ChatId, message: MessageId, notify: bool) -> Result<(), PlatformError> {
        self.bot
            .pin_chat_message(chat, message)
            .disable_notification(!notify)
            .await?;
        Ok(())
    }

    async fn unpin_message(&self, chat: ChatId, message: Option<MessageId>) -> Result<(), PlatformError> {
        match message {
            Some(id) => self.bot.unpin_chat_message(chat).message_id(id).await?,
            None => self.bot.unpin_chat_message(chat).await?,
        };
        Ok(())
    }

    async fn unpin_all(&self, chat: ChatId) -> Result<(), PlatformError> {
        self.bot.unpin_all_chat_messages(chat).await?;
        Ok(())
    }

    async fn kick_member(&self, chat: ChatId, user: UserId) -> Result<(), PlatformError> {
        // Ban then unban = kick
        self.bot.ban_chat_member(chat, user).await?;
        if let Err(e) = self
            .bot
            .unban_chat_member(chat, user)
            .only_if_banned(true)
            .await
        {
            error!(
                "Kick of user {} in chat {}: ban succeeded but unban failed: {}",
                user, chat, e
            );
            return Err(PlatformError::StillBanned(e.to_string()));
        }
        Ok(())
    }

    async fn ban_member(&self, chat: ChatId, user: UserId) -> Result<(), PlatformError> {
        self.bot.ban_chat_member(chat, user).await?;
        Ok(())
    }

    async fn unban_member(&self, chat: ChatId, user: UserId) -> Result<(), PlatformError> {
        self.bot.unban_chat_member(chat, user).await?;
        Ok(())
    }

    async fn chat_admins(&self, chat: ChatId) -> Result<Vec<UserId>, PlatformError> {
        let admins = self.bot.get_chat_administrators(chat).await?;
        Ok(admins.iter().map(|member| member.user.id).collect())
    }

    async fn chat_member(&self, chat: ChatId, user: UserId) -> Result<ChatMember, PlatformError> {
        let member = self.bot.get_chat_member(chat, user).await?;
        Ok(ChatMember::from(&member))
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), PlatformError> {
        self.bot.delete_message(chat, message).await?;
        Ok(())
    }

    async fn get_chat(&self, chat: ChatId) -> Result<ChatInfo, PlatformError> {
        let chat = self.bot.get_chat(chat).await?;
        let pinned = chat.pinned_message.as_ref().map(|pinned| PinnedMessage {
            id: pinned.id,
            text: pinned.text().or_else(|| pinned.caption()).map(String::from),
        });
        Ok(ChatInfo { pinned })
    }
}
