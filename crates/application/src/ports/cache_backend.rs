use async_trait::async_trait;
use bytes::Bytes;
use ferrous_reports_domain::DomainError;
use std::time::Duration;

/// Key-value store with per-write expiry backing the response cache.
///
/// Implementations may sit on the other side of a network. Callers treat
/// every error as a cache miss (on `get`) or as "not cached" (on `set`);
/// a failing backend must never turn into a failed response.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// `Ok(None)` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError>;

    /// Write is atomic per key: readers see the previous value or this one,
    /// never a partial write.
    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), DomainError>;
}

/// Backends that hold expired entries in memory until purged.
#[async_trait]
pub trait CacheCompactor: Send + Sync {
    /// Drop expired entries, returning how many were removed.
    async fn purge_expired(&self) -> usize;

    fn entry_count(&self) -> usize;
}
