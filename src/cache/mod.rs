//! Cache module - Small typed caches over Moka.
//!
//! Used for data fetched from the platform that is read far more often than
//! it changes, such as chat administrator lists.
//!
//! ## Usage
//!
//! ```rust
//! let admins: TypedCache<i64, Arc<HashSet<UserId>>> =
//!     TypedCache::new("chat_admins", CacheConfig::admin_lists());
//!
//! admins.insert(chat_id, list);
//! let list = admins.get(&chat_id);
//! ```

mod config;
mod typed;

pub use config::CacheConfig;
pub use typed::TypedCache;
