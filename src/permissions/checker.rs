//! Permission checker with caching.

use std::collections::HashSet;
use std::sync::Arc;

use teloxide::types::{ChatId, UserId};
use tracing::{debug, warn};

use crate::cache::{CacheConfig, TypedCache};
use crate::platform::{Platform, PlatformError};

/// Permission checker with caching support.
///
/// Bot admins (from `ADMIN_USER_IDS`) are admins in every chat.
#[derive(Clone)]
pub struct Permissions {
    platform: Arc<dyn Platform>,
    cache: TypedCache<i64, Arc<HashSet<UserId>>>,
    bot_admins: Arc<HashSet<u64>>,
}

impl Permissions {
    /// Create a new permission checker with the static bot admin set.
    pub fn new(platform: Arc<dyn Platform>, bot_admins: HashSet<u64>) -> Self {
        Self {
            platform,
            cache: TypedCache::new("chat_admins", CacheConfig::admin_lists()),
            bot_admins: Arc::new(bot_admins),
        }
    }

    /// Check if a user is a configured bot admin.
    #[inline]
    pub fn is_bot_admin(&self, user_id: UserId) -> bool {
        self.bot_admins.contains(&user_id.0)
    }

    /// Administrator ids of a chat, from cache or the platform.
    pub async fn chat_admins(&self, chat_id: ChatId) -> Result<Arc<HashSet<UserId>>, PlatformError> {
        if let Some(cached) = self.cache.get(&chat_id.0) {
            debug!("Admin cache hit for chat {}", chat_id);
            return Ok(cached);
        }

        debug!("Admin cache miss for chat {}", chat_id);

        let admins: Arc<HashSet<UserId>> = Arc::new(
            self.platform
                .chat_admins(chat_id)
                .await?
                .into_iter()
                .collect(),
        );
        self.cache.insert(chat_id.0, admins.clone());

        Ok(admins)
    }

    /// Check if a user is an admin (bot admin or chat admin).
    ///
    /// A failed lookup counts as "not an admin".
    pub async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> bool {
        if self.is_bot_admin(user_id) {
            return true;
        }

        match self.chat_admins(chat_id).await {
            Ok(admins) => admins.contains(&user_id),
            Err(e) => {
                warn!("Could not fetch admins of chat {}: {}", chat_id, e);
                false
            }
        }
    }

    /// Drop the cached administrator list of a chat.
    ///
    /// Call this when admin status might have changed.
    pub fn invalidate(&self, chat_id: ChatId) {
        self.cache.invalidate(&chat_id.0);
        debug!("Invalidated admin cache for chat {}", chat_id);
    }
}
