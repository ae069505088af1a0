//! Typed view over a chat's settings bag.

use teloxide::types::{ChatId, UserId};

use super::models::keys;
use super::{FilterEntry, FilterSet, Setting, StateStore, Toggle};

/// Typed accessors for one chat.
///
/// Values of an unexpected shape read as absent.
pub struct ChatSettings<'a> {
    store: &'a dyn StateStore,
    chat: ChatId,
}

impl<'a> ChatSettings<'a> {
    pub fn new(store: &'a dyn StateStore, chat: ChatId) -> Self {
        Self { store, chat }
    }

    pub fn toggle(&self, toggle: Toggle) -> bool {
        self.store
            .get(self.chat, toggle.key())
            .and_then(|v| v.as_flag())
            .unwrap_or(false)
    }

    pub fn set_toggle(&self, toggle: Toggle, enabled: bool) {
        self.store.set(self.chat, toggle.key(), Setting::Flag(enabled));
    }

    pub fn welcome_message(&self) -> Option<String> {
        self.store
            .get(self.chat, keys::WELCOME_MESSAGE)
            .and_then(|v| v.as_text().map(String::from))
            .filter(|text| !text.is_empty())
    }

    pub fn set_welcome_message(&self, template: impl Into<String>) {
        self.store
            .set(self.chat, keys::WELCOME_MESSAGE, Setting::Text(template.into()));
    }

    pub fn filters(&self) -> FilterSet {
        match self.store.get(self.chat, keys::FILTERS) {
            Some(Setting::Filters(filters)) => filters,
            _ => FilterSet::default(),
        }
    }

    /// First filter matching `body`, looked up in place.
    pub fn matching_filter(&self, body: &str) -> Option<FilterEntry> {
        let mut found = None;
        self.store.read(self.chat, keys::FILTERS, &mut |value| {
            if let Some(Setting::Filters(filters)) = value {
                found = filters.find_match(body).cloned();
            }
        });
        found
    }

    /// Add or replace a filter. Returns `true` if the trigger was new.
    pub fn add_filter(&self, trigger: &str, reply: &str) -> bool {
        let mut added = false;
        self.store.update(self.chat, keys::FILTERS, &mut |slot| {
            if !matches!(slot, Some(Setting::Filters(_))) {
                *slot = Some(Setting::Filters(FilterSet::default()));
            }
            if let Some(Setting::Filters(filters)) = slot {
                added = filters.insert(trigger, reply);
            }
        });
        added
    }

    /// Remove one filter. The key is dropped once the last filter is gone.
    pub fn remove_filter(&self, trigger: &str) -> bool {
        let mut removed = false;
        self.store.update(self.chat, keys::FILTERS, &mut |slot| {
            if let Some(Setting::Filters(filters)) = slot {
                removed = filters.remove(trigger);
                if filters.is_empty() {
                    *slot = None;
                }
            }
        });
        removed
    }

    /// Drop every filter. Returns `false` if there were none.
    pub fn clear_filters(&self) -> bool {
        self.store.delete(self.chat, keys::FILTERS)
    }

    /// Count one message from `user` and return the new total.
    pub fn record_activity(&self, user: UserId) -> u64 {
        self.store.increment(self.chat, keys::USER_ACTIVITY, user)
    }

    /// Up to `limit` most active users, highest count first.
    pub fn top_activity(&self, limit: usize) -> Vec<(UserId, u64)> {
        let mut ranking = Vec::new();
        self.store.read(self.chat, keys::USER_ACTIVITY, &mut |value| {
            if let Some(Setting::Counters(counters)) = value {
                ranking = counters.top(limit);
            }
        });
        ranking
    }

    #[cfg(test)]
    pub fn activity(&self) -> super::ActivityCounters {
        match self.store.get(self.chat, keys::USER_ACTIVITY) {
            Some(Setting::Counters(counters)) => counters,
            _ => super::ActivityCounters::default(),
        }
    }
}
