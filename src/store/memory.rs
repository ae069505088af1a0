//! In-memory state store.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use teloxide::types::ChatId;
use tracing::debug;

use super::{Setting, StateStore};

/// Settings bag of a single chat.
pub type ChatBag = HashMap<String, Setting>;

/// Process-lifetime store backed by a concurrent map of per-chat bags.
///
/// Every chat gets its own mutex, so updates to one chat are serialized
/// while different chats never contend with each other.
#[derive(Clone, Default)]
pub struct MemoryStore {
    chats: Arc<DashMap<i64, Arc<Mutex<ChatBag>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the chat's bag, creating it if needed.
    ///
    /// The `Arc` is cloned out so the map shard is unlocked before the
    /// chat mutex is taken.
    fn bag(&self, chat: ChatId) -> Arc<Mutex<ChatBag>> {
        self.chats
            .entry(chat.0)
            .or_insert_with(|| {
                debug!("Creating state bag for chat {}", chat);
                Arc::default()
            })
            .clone()
    }

    fn existing(&self, chat: ChatId) -> Option<Arc<Mutex<ChatBag>>> {
        self.chats.get(&chat.0).map(|bag| bag.clone())
    }

    /// Number of chats with a bag.
    #[cfg(test)]
    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, chat: ChatId, key: &str, f: &mut dyn FnMut(Option<&Setting>)) {
        match self.existing(chat) {
            Some(bag) => f(bag.lock().get(key)),
            None => f(None),
        }
    }

    fn set(&self, chat: ChatId, key: &str, value: Setting) {
        self.bag(chat).lock().insert(key.to_string(), value);
    }

    fn delete(&self, chat: ChatId, key: &str) -> bool {
        match self.existing(chat) {
            Some(bag) => bag.lock().remove(key).is_some(),
            None => false,
        }
    }

    fn update(&self, chat: ChatId, key: &str, f: &mut dyn FnMut(&mut Option<Setting>)) {
        let bag = self.bag(chat);
        let mut bag = bag.lock();

        let mut slot = bag.remove(key);
        f(&mut slot);
        if let Some(value) = slot {
            bag.insert(key.to_string(), value);
        }
    }
}
