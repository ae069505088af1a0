//! Recording platform used by handler tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use teloxide::types::{ChatId, MessageId, UserId};

use super::{ChatInfo, ChatMember, MemberStatus, Outgoing, Platform, PlatformError, UserRef};

/// One recorded platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send { chat: ChatId, message: Outgoing },
    Typing { chat: ChatId },
    Pin { chat: ChatId, message: MessageId, notify: bool },
    Unpin { chat: ChatId, message: Option<MessageId> },
    UnpinAll { chat: ChatId },
    Kick { chat: ChatId, user: UserId },
    Ban { chat: ChatId, user: UserId },
    Unban { chat: ChatId, user: UserId },
    Admins { chat: ChatId },
    Member { chat: ChatId, user: UserId },
    Delete { chat: ChatId, message: MessageId },
    GetChat { chat: ChatId },
}

impl Call {
    /// Lookups and replies do not change anything on the platform side.
    pub fn is_moderation(&self) -> bool {
        !matches!(
            self,
            Call::Send { .. } | Call::Typing { .. } | Call::Admins { .. } | Call::Member { .. } | Call::GetChat { .. }
        )
    }
}

/// Fake platform that records every call and answers from canned data.
#[derive(Default)]
pub struct MockPlatform {
    calls: Mutex<Vec<Call>>,
    admins: Mutex<HashMap<i64, Vec<UserId>>>,
    members: Mutex<HashMap<(i64, u64), ChatMember>>,
    chat_info: Mutex<ChatInfo>,
    failing: Mutex<HashSet<&'static str>>,
    next_message_id: AtomicI32,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicI32::new(1000),
            ..Default::default()
        }
    }

    pub fn with_admins(self, chat: ChatId, admins: &[u64]) -> Self {
        self.admins
            .lock()
            .insert(chat.0, admins.iter().map(|id| UserId(*id)).collect());
        self
    }

    pub fn with_member(self, chat: ChatId, user: UserRef) -> Self {
        self.with_member_status(chat, user, MemberStatus::Member)
    }

    pub fn with_member_status(self, chat: ChatId, user: UserRef, status: MemberStatus) -> Self {
        self.members
            .lock()
            .insert((chat.0, user.id.0), ChatMember { user, status });
        self
    }

    pub fn with_pinned(self, info: ChatInfo) -> Self {
        *self.chat_info.lock() = info;
        self
    }

    /// Make the named operation fail with an API error.
    ///
    /// `"kick_unban"` makes a kick fail after its ban step.
    pub fn failing(self, operation: &'static str) -> Self {
        self.failing.lock().insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Texts of all sent messages, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Send { message, .. } => Some(message.text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn sent(&self) -> Vec<Outgoing> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Send { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn moderation_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_moderation).collect()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), PlatformError> {
        self.calls.lock().push(call);
        if self.failing.lock().contains(operation) {
            return Err(PlatformError::Api(format!("{} failed: not enough rights", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn send_message(&self, chat: ChatId, message: Outgoing) -> Result<MessageId, PlatformError> {
        self.record("send", Call::Send { chat, message })?;
        Ok(MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn send_typing(&self, chat: ChatId) -> Result<(), PlatformError> {
        self.record("typing", Call::Typing { chat })
    }

    async fn pin_message(&self, chat: ChatId, message: MessageId, notify: bool) -> Result<(), PlatformError> {
        self.record("pin", Call::Pin { chat, message, notify })
    }

    async fn unpin_message(&self, chat: ChatId, message: Option<MessageId>) -> Result<(), PlatformError> {
        self.record("unpin", Call::Unpin { chat, message })
    }

    async fn unpin_all(&self, chat: ChatId) -> Result<(), PlatformError> {
        self.record("unpin_all", Call::UnpinAll { chat })
    }

    async fn kick_member(&self, chat: ChatId, user: UserId) -> Result<(), PlatformError> {
        self.record("kick", Call::Kick { chat, user })?;
        if self.failing.lock().contains("kick_unban") {
            return Err(PlatformError::StillBanned("not enough rights".to_string()));
        }
        Ok(())
    }

    async fn ban_member(&self, chat: ChatId, user: UserId) -> Result<(), PlatformError> {
        self.record("ban", Call::Ban { chat, user })
    }

    async fn unban_member(&self, chat: ChatId, user: UserId) -> Result<(), PlatformError> {
        self.record("unban", Call::Unban { chat, user })
    }

    async fn chat_admins(&self, chat: ChatId) -> Result<Vec<UserId>, PlatformError> {
        self.record("admins", Call::Admins { chat })?;
        Ok(self.admins.lock().get(&chat.0).cloned().unwrap_or_default())
    }

    async fn chat_member(&self, chat: ChatId, user: UserId) -> Result<ChatMember, PlatformError> {
        self.record("member", Call::Member { chat, user })?;
        self.members
            .lock()
            .get(&(chat.0, user.0))
            .cloned()
            .ok_or_else(|| PlatformError::Api("Bad Request: user not found".to_string()))
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), PlatformError> {
        self.record("delete", Call::Delete { chat, message })
    }

    async fn get_chat(&self, chat: ChatId) -> Result<ChatInfo, PlatformError> {
        self.record("get_chat", Call::GetChat { chat })?;
        Ok(self.chat_info.lock().clone())
    }
}
