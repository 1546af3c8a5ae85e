use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use ferrous_reports_application::ports::{CacheBackend, CacheCompactor};
use ferrous_reports_domain::DomainError;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct StoredEntry {
    value: Bytes,
    expires_at: Instant,
}

impl StoredEntry {
    #[inline]
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Process-local cache backend with per-entry expiry.
///
/// Expired entries are invisible to `get` and removed lazily on access or in
/// bulk by `purge_expired`. When full, expired entries are purged first, then
/// the entry closest to expiry is evicted.
pub struct InMemoryCacheBackend {
    entries: DashMap<String, StoredEntry>,
    max_entries: usize,
}

impl InMemoryCacheBackend {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    fn purge_expired_now(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }

    fn evict_soonest_expiring(&self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().expires_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
            debug!(key = %key, "Evicted cache entry to make room");
        }
    }
}

#[async_trait]
impl CacheBackend for InMemoryCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError> {
        let now = Instant::now();
        match self.entries.get(key) {
            Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), DomainError> {
        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            self.purge_expired_now();
            if self.entries.len() >= self.max_entries {
                self.evict_soonest_expiring();
            }
        }

        self.entries.insert(
            key.to_string(),
            StoredEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

#[async_trait]
impl CacheCompactor for InMemoryCacheBackend {
    async fn purge_expired(&self) -> usize {
        self.purge_expired_now()
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
