//! Per-chat state store.
//!
//! Each chat owns a bag of named settings (filters, toggles, welcome text,
//! activity counters). Bags are created lazily on first write and live until
//! the process exits.
//!
//! ## Usage
//!
//! ```rust
//! let store = MemoryStore::new();
//! let settings = ChatSettings::new(&store, chat_id);
//!
//! settings.add_filter("hello", "hi there");
//! settings.record_activity(user_id);
//! ```

mod memory;
pub mod models;
mod settings;

use teloxide::types::{ChatId, UserId};

pub use memory::MemoryStore;
pub use models::{ActivityCounters, FilterEntry, FilterSet, Setting, Toggle};
pub use settings::ChatSettings;

/// Access protocol every backing store implements.
///
/// Operations never fail: unknown chats and keys read as absent. A durable
/// implementation would have to provide the same semantics.
pub trait StateStore: Send + Sync {
    /// Run `f` on the current value of `key` without copying it out.
    ///
    /// The chat stays locked while `f` runs.
    fn read(&self, chat: ChatId, key: &str, f: &mut dyn FnMut(Option<&Setting>));

    /// Current value of `key`, if any.
    fn get(&self, chat: ChatId, key: &str) -> Option<Setting> {
        let mut value = None;
        self.read(chat, key, &mut |current| value = current.cloned());
        value
    }

    /// Overwrite `key`, creating the chat's bag if needed.
    fn set(&self, chat: ChatId, key: &str, value: Setting);

    /// Remove `key`. Returns `true` if it was present.
    fn delete(&self, chat: ChatId, key: &str) -> bool;

    /// Read-modify-write `key` as one atomic step.
    ///
    /// `f` receives the current value (or `None`); whatever it leaves in
    /// the slot is stored, and `None` removes the key.
    fn update(&self, chat: ChatId, key: &str, f: &mut dyn FnMut(&mut Option<Setting>));

    /// Add one to the counter of `subkey` under `key` and return the result.
    ///
    /// Creates the counter map if missing. A value of another shape under
    /// `key` is replaced.
    fn increment(&self, chat: ChatId, key: &str, subkey: UserId) -> u64 {
        let mut count = 0;
        self.update(chat, key, &mut |slot| {
            if !matches!(slot, Some(Setting::Counters(_))) {
                *slot = Some(Setting::Counters(ActivityCounters::default()));
            }
            if let Some(Setting::Counters(counters)) = slot {
                count = counters.increment(subkey);
            }
        });
        count
    }
}
