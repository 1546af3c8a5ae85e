use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Cache backend error: {0}")]
    CacheBackend(String),

    #[error("Cache entry could not be encoded or decoded: {0}")]
    CacheSerialization(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Refresh of view {view} timed out after {timeout_secs}s")]
    RefreshTimeout { view: String, timeout_secs: u64 },

    #[error("Refresh of view {0} was cancelled")]
    RefreshCancelled(String),

    #[error("Invalid view name: {0}")]
    InvalidViewName(String),

    #[error("Metrics error: {0}")]
    Metrics(String),

    #[error("Metrics push failed: {0}")]
    MetricsPush(String),
}
