//! Values held in a chat's settings bag.

use std::collections::HashMap;

use teloxide::types::UserId;

/// Bag keys used by the handlers.
pub mod keys {
    pub const USER_ACTIVITY: &str = "user_activity";
    pub const FILTERS: &str = "filters";
    pub const WELCOME_MESSAGE: &str = "welcome_message";
}

/// A single value stored under a bag key.
///
/// The store does not check which variant lives under which key; the typed
/// accessors in [`super::ChatSettings`] are responsible for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    Flag(bool),
    Text(String),
    Filters(FilterSet),
    Counters(ActivityCounters),
}

impl Setting {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Per-chat boolean features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    /// Delete messages sent by other bots.
    NoBots,
    /// Delete automatic forwards from the linked channel.
    CleanLinked,
    /// Unpin automatic forwards from the linked channel.
    AntiChannelPin,
}

impl Toggle {
    #[cfg(test)]
    pub const ALL: [Toggle; 3] = [Toggle::NoBots, Toggle::CleanLinked, Toggle::AntiChannelPin];

    /// Bag key holding the flag.
    pub fn key(self) -> &'static str {
        match self {
            Self::NoBots => "nobots_enabled",
            Self::CleanLinked => "cleanlinked_enabled",
            Self::AntiChannelPin => "antichannelpin_enabled",
        }
    }

    /// Text catalog key of the human readable feature name.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::NoBots => "toggles.nobots",
            Self::CleanLinked => "toggles.cleanlinked",
            Self::AntiChannelPin => "toggles.antichannelpin",
        }
    }
}

/// A filter trigger and its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub trigger: String,
    pub reply: String,
}

/// Filters of one chat, kept in insertion order.
///
/// Triggers are stored lowercased and are unique. Matching walks the entries
/// in insertion order, so the oldest matching trigger wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: Vec<FilterEntry>,
}

impl FilterSet {
    /// Insert or replace a filter.
    ///
    /// Replacing keeps the trigger's original position. Returns `true` if
    /// the trigger was new.
    pub fn insert(&mut self, trigger: &str, reply: impl Into<String>) -> bool {
        let trigger = trigger.to_lowercase();
        let reply = reply.into();

        match self.entries.iter_mut().find(|e| e.trigger == trigger) {
            Some(existing) => {
                existing.reply = reply;
                false
            }
            None => {
                self.entries.push(FilterEntry { trigger, reply });
                true
            }
        }
    }

    /// Remove a filter by trigger (case-insensitive).
    pub fn remove(&mut self, trigger: &str) -> bool {
        let trigger = trigger.to_lowercase();
        let before = self.entries.len();
        self.entries.retain(|e| e.trigger != trigger);
        self.entries.len() != before
    }

    /// First filter whose trigger is a substring of the lowercased body.
    pub fn find_match(&self, body: &str) -> Option<&FilterEntry> {
        let body = body.to_lowercase();
        self.entries.iter().find(|e| body.contains(&e.trigger))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Message counts per user, in order of each user's first message.
///
/// `positions` maps a user to their slot in `entries`, so counting a message
/// does not scan the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCounters {
    entries: Vec<(UserId, u64)>,
    positions: HashMap<UserId, usize>,
}

impl ActivityCounters {
    /// Add one message for `user` and return the new count.
    pub fn increment(&mut self, user: UserId) -> u64 {
        match self.positions.get(&user) {
            Some(&pos) => {
                let count = &mut self.entries[pos].1;
                *count += 1;
                *count
            }
            None => {
                self.positions.insert(user, self.entries.len());
                self.entries.push((user, 1));
                1
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, user: UserId) -> u64 {
        self.positions
            .get(&user)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Up to `limit` users ordered by count, highest first.
    ///
    /// Ties keep the order in which the users were first counted.
    pub fn top(&self, limit: usize) -> Vec<(UserId, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_triggers_are_case_insensitive() {
        let mut filters = FilterSet::default();
        assert!(filters.insert("SPAM", "no spam here"));

        let hit = filters.find_match("This is Spam content").unwrap();
        assert_eq!(hit.trigger, "spam");
        assert_eq!(hit.reply, "no spam here");
        assert!(filters.find_match("nothing to see").is_none());
    }

    #[test]
    fn test_filter_first_inserted_wins() {
        let mut filters = FilterSet::default();
        filters.insert("hello", "first");
        filters.insert("hello world", "second");

        assert_eq!(filters.find_match("well hello world").unwrap().reply, "first");
    }

    #[test]
    fn test_filter_replace_keeps_position() {
        let mut filters = FilterSet::default();
        filters.insert("a", "1");
        filters.insert("b", "2");
        assert!(!filters.insert("A", "3"));

        let triggers: Vec<_> = filters.iter().map(|e| (e.trigger.as_str(), e.reply.as_str())).collect();
        assert_eq!(triggers, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_filter_remove() {
        let mut filters = FilterSet::default();
        filters.insert("spam", "x");
        assert!(filters.remove("SPAM"));
        assert!(!filters.remove("spam"));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_top_orders_by_count_descending() {
        let mut counters = ActivityCounters::default();
        let (a, b, c) = (UserId(1), UserId(2), UserId(3));
        for _ in 0..10 {
            counters.increment(a);
        }
        for _ in 0..5 {
            counters.increment(b);
        }
        for _ in 0..15 {
            counters.increment(c);
        }

        assert_eq!(counters.top(5), vec![(c, 15), (a, 10), (b, 5)]);
    }

    #[test]
    fn test_top_ties_keep_first_seen_order() {
        let mut counters = ActivityCounters::default();
        counters.increment(UserId(7));
        counters.increment(UserId(3));
        counters.increment(UserId(9));
        counters.increment(UserId(9));

        assert_eq!(
            counters.top(5),
            vec![(UserId(9), 2), (UserId(7), 1), (UserId(3), 1)]
        );
    }

    #[test]
    fn test_top_limit() {
        let mut counters = ActivityCounters::default();
        for id in 0..8 {
            counters.increment(UserId(id));
        }
        assert_eq!(counters.top(5).len(), 5);
        assert_eq!(counters.len(), 8);
    }

    #[test]
    fn test_increment_after_many_users_hits_the_right_slot() {
        let mut counters = ActivityCounters::default();
        for id in 0..1000 {
            counters.increment(UserId(id));
        }
        assert_eq!(counters.increment(UserId(500)), 2);
        assert_eq!(counters.increment(UserId(0)), 2);
        assert_eq!(counters.increment(UserId(999)), 2);

        assert_eq!(counters.get(UserId(500)), 2);
        assert_eq!(counters.get(UserId(1)), 1);
        assert_eq!(counters.get(UserId(5000)), 0);
        assert_eq!(counters.len(), 1000);
        assert_eq!(
            counters.top(3),
            vec![(UserId(0), 2), (UserId(500), 2), (UserId(999), 2)]
        );
    }
}
