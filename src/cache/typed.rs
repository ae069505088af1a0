//! Named, typed wrapper around a Moka cache.

use std::hash::Hash;

use moka::sync::Cache;
use tracing::debug;

use super::CacheConfig;

/// Bounded expiring cache. Clones share the same entries.
#[derive(Clone)]
pub struct TypedCache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
}

impl<K, V> TypedCache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// `name` labels the cache in moka and in the logs.
    pub fn new(name: &str, config: CacheConfig) -> Self {
        let mut builder = Cache::builder()
            .name(name)
            .max_capacity(config.max_capacity);

        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        if let Some(tti) = config.tti {
            builder = builder.time_to_idle(tti);
        }

        debug!("Created cache '{}' ({:?})", name, config);
        Self {
            inner: builder.build(),
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value);
    }

    /// Live entry for `key`; expired entries read as `None`.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key)
    }

    pub fn invalidate(&self, key: &K) {
        self.inner.invalidate(key);
    }
}
