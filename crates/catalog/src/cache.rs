//! Session-scoped key/value cache for serialized catalogs.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

pub trait SessionCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone)]
struct CachedValue {
    value: String,
    stored_at: DateTime<Utc>,
}

/// A cache that lives as long as the process.
#[derive(Debug, Default)]
pub struct InMemorySessionCache {
    entries: DashMap<String, CachedValue>,
}

impl InMemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `key` was last written.
    pub fn stored_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|entry| entry.stored_at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionCache for InMemorySessionCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(
            key.to_string(),
            CachedValue {
                value,
                stored_at: Utc::now(),
            },
        );
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}
