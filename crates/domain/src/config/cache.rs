use serde::{Deserialize, Serialize};

/// Response cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false, report routes are served live and never cached (default: true)
    pub enabled: bool,

    /// Upper bound on stored entries in the in-memory backend (default: 10000)
    pub max_entries: usize,

    /// Responses larger than this are served but not cached (default: 64 MiB)
    pub max_body_bytes: usize,

    /// How often expired entries are purged from memory (default: 300)
    pub compaction_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 10_000,
            max_body_bytes: 64 * 1024 * 1024,
            compaction_interval_secs: 300,
        }
    }
}
