//! Message dispatcher setup.
//!
//! Builds the dispatcher with all command handlers and event handlers.

use std::collections::HashSet;
use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatId, UserId};

use crate::events;
use crate::permissions::Permissions;
use crate::platform::Platform;
use crate::plugins;
use crate::store::{ChatSettings, StateStore};

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Messaging platform client.
    pub platform: Arc<dyn Platform>,

    /// Per-chat settings store.
    pub store: Arc<dyn StateStore>,

    /// Permission checker with admin caching.
    pub permissions: Permissions,

    /// Chat that receives /announce messages.
    pub target_chat_id: Option<ChatId>,

    /// Our own user id (to tell our messages apart from other bots).
    pub bot_id: UserId,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        platform: Arc<dyn Platform>,
        store: Arc<dyn StateStore>,
        admin_ids: HashSet<u64>,
        target_chat_id: Option<ChatId>,
        bot_id: UserId,
    ) -> Self {
        let permissions = Permissions::new(platform.clone(), admin_ids);

        Self {
            platform,
            store,
            permissions,
            target_chat_id,
            bot_id,
        }
    }

    /// Typed settings of a chat.
    pub fn settings(&self, chat_id: ChatId) -> ChatSettings<'_> {
        ChatSettings::new(self.store.as_ref(), chat_id)
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|_| async {})
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    // Message handlers: commands first, then the moderation pipeline
    let message_handler = Update::filter_message()
        .branch(plugins::command_handler())
        .branch(events::message_event_handler());

    // Chat member events (welcome new members)
    let member_handler = Update::filter_chat_member().branch(events::event_handler());

    dptree::entry()
        .branch(message_handler)
        .branch(member_handler)
}
