use serde::{Deserialize, Serialize};

/// Postgres connection used to refresh the backing views
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL (e.g. "postgres://reports@localhost/reports").
    /// Without it the server runs but view refreshes are skipped.
    pub url: Option<String>,

    /// Maximum pool size (default: 10)
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection (default: 30)
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 30,
        }
    }
}
