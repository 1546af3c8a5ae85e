use crate::ports::CacheBackend;
use bytes::Bytes;
use ferrous_reports_domain::{CacheKey, CachedResponse};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Best-effort lookup and fill of captured report responses.
///
/// Neither operation can fail: backend errors and undecodable entries become
/// misses, failed writes are logged and dropped. A broken backend degrades
/// the server to "no caching", never to a wrong or missing response.
pub struct ResponseCache {
    backend: Arc<dyn CacheBackend>,
}

impl ResponseCache {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    pub async fn lookup(&self, key: &CacheKey) -> Option<CachedResponse> {
        let raw = match self.backend.get(key.as_str()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "Cache MISS");
                return None;
            }
            Err(e) => {
                debug!(key = %key, error = %e, "Cache MISS: backend lookup failed");
                return None;
            }
        };

        match CachedResponse::from_slice(&raw) {
            Ok(response) => {
                debug!(key = %key, "Cache HIT");
                Some(response)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Store a captured response under `key` for `ttl`.
    ///
    /// Only successful responses are written; anything else would be replayed
    /// to every caller until it expired.
    pub async fn store(&self, key: &CacheKey, response: &CachedResponse, ttl: Duration) {
        if !response.is_success() {
            debug!(key = %key, status = response.status, "Not caching unsuccessful response");
            return;
        }

        let encoded = match response.to_bytes() {
            Ok(encoded) => Bytes::from(encoded),
            Err(e) => {
                warn!(key = %key, error = %e, "Could not encode response for caching");
                return;
            }
        };

        debug!(key = %key, ttl_secs = ttl.as_secs(), "Caching new response");
        if let Err(e) = self.backend.set(key.as_str(), encoded, ttl).await {
            warn!(key = %key, error = %e, "Could not cache response");
        }
    }
}
