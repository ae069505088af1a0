//! Fixtures shared by handler tests.

use std::collections::HashSet;
use std::sync::Arc;

use teloxide::types::{ChatId, MessageId, UserId};

use super::{CommandInput, RepliedMessage};
use crate::bot::dispatcher::AppState;
use crate::platform::UserRef;
use crate::store::MemoryStore;

pub use crate::platform::mock::{Call, MockPlatform};

pub const CHAT: ChatId = ChatId(-100_123);
pub const TARGET_CHAT: ChatId = ChatId(-100_999);
pub const BOT_ID: u64 = 42;
pub const BOT_ADMIN: u64 = 1;
pub const ADMIN: u64 = 2;
pub const MEMBER: u64 = 3;
pub const TARGET: u64 = 4;
pub const COMMAND_MESSAGE: MessageId = MessageId(10);
pub const REPLIED_MESSAGE: MessageId = MessageId(9);

pub fn user(id: u64, first_name: &str) -> UserRef {
    UserRef {
        id: UserId(id),
        first_name: first_name.to_string(),
        last_name: None,
        is_bot: false,
    }
}

/// State backed by `platform`, where [`ADMIN`] administers [`CHAT`] and
/// announcements go to [`TARGET_CHAT`].
pub fn test_state(platform: MockPlatform) -> (AppState, Arc<MockPlatform>) {
    test_state_with_target(platform, Some(TARGET_CHAT))
}

pub fn test_state_with_target(
    platform: MockPlatform,
    target: Option<ChatId>,
) -> (AppState, Arc<MockPlatform>) {
    let platform = Arc::new(platform.with_admins(CHAT, &[ADMIN]));
    let state = AppState::new(
        platform.clone(),
        Arc::new(MemoryStore::new()),
        HashSet::from([BOT_ADMIN]),
        target,
        UserId(BOT_ID),
    );
    (state, platform)
}

/// `/command args` sent to [`CHAT`] by `from`.
pub fn input(from: u64, args: &str) -> CommandInput {
    CommandInput {
        chat: CHAT,
        message_id: COMMAND_MESSAGE,
        from: Some(user(from, "Caller")),
        args: args.to_string(),
        replied: None,
    }
}

/// Like [`input`], replying to a message written by `target`.
pub fn replying_input(from: u64, args: &str, target: u64) -> CommandInput {
    CommandInput {
        replied: Some(RepliedMessage {
            id: REPLIED_MESSAGE,
            from: Some(user(target, "Bob")),
        }),
        ..input(from, args)
    }
}
