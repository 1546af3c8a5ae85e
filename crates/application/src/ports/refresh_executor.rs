use async_trait::async_trait;
use ferrous_reports_domain::DomainError;

/// Executes refresh statements against the store that owns the backing views.
///
/// Dropping a returned future must abandon the underlying statement; the
/// refresh coordinator relies on that to enforce timeouts and shutdown.
#[async_trait]
pub trait RefreshExecutor: Send + Sync {
    async fn row_count(&self, view: &str) -> Result<i64, DomainError>;

    /// Non-locking refresh. Fails when the view has never been populated.
    async fn refresh_concurrent(&self, view: &str) -> Result<(), DomainError>;

    /// Locking refresh; readers block until it completes.
    async fn refresh_blocking(&self, view: &str) -> Result<(), DomainError>;
}
