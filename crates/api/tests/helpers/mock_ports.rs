use async_trait::async_trait;
use axum::body::Bytes;
use ferrous_reports_application::ports::{CacheBackend, RefreshExecutor};
use ferrous_reports_domain::DomainError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// ============================================================================
// Cache backend that always fails
// ============================================================================

#[derive(Default)]
pub struct FailingCacheBackend {
    pub get_calls: AtomicU64,
    pub set_calls: AtomicU64,
}

#[async_trait]
impl CacheBackend for FailingCacheBackend {
    async fn get(&self, _key: &str) -> Result<Option<Bytes>, DomainError> {
        self.get_calls.fetch_add(1, Ordering::Relaxed);
        Err(DomainError::CacheBackend("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: Bytes, _ttl: Duration) -> Result<(), DomainError> {
        self.set_calls.fetch_add(1, Ordering::Relaxed);
        Err(DomainError::CacheBackend("connection refused".to_string()))
    }
}

// ============================================================================
// RefreshExecutor with fixed row counts
// ============================================================================

pub struct FixedRowsExecutor {
    rows: i64,
    broken_views: HashSet<String>,
    refresh_delay: Option<Duration>,
    row_count_calls: AtomicU64,
    concurrent_calls: AtomicU64,
    completed_refreshes: AtomicU64,
}

impl FixedRowsExecutor {
    pub fn new(rows: i64) -> Self {
        Self {
            rows,
            broken_views: HashSet::new(),
            refresh_delay: None,
            row_count_calls: AtomicU64::new(0),
            concurrent_calls: AtomicU64::new(0),
            completed_refreshes: AtomicU64::new(0),
        }
    }

    /// Every concurrent refresh sleeps this long before succeeding.
    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = Some(delay);
        self
    }

    pub fn with_broken_view(mut self, view: &str) -> Self {
        self.broken_views.insert(view.to_string());
        self
    }

    pub fn row_count_calls(&self) -> u64 {
        self.row_count_calls.load(Ordering::Relaxed)
    }

    pub fn concurrent_calls(&self) -> u64 {
        self.concurrent_calls.load(Ordering::Relaxed)
    }

    pub fn completed_refreshes(&self) -> u64 {
        self.completed_refreshes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RefreshExecutor for FixedRowsExecutor {
    async fn row_count(&self, view: &str) -> Result<i64, DomainError> {
        self.row_count_calls.fetch_add(1, Ordering::Relaxed);
        if self.broken_views.contains(view) {
            return Err(DomainError::DatabaseError(format!(
                "relation \"{view}\" does not exist"
            )));
        }
        Ok(self.rows)
    }

    async fn refresh_concurrent(&self, view: &str) -> Result<(), DomainError> {
        self.concurrent_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(delay) = self.refresh_delay {
            tokio::time::sleep(delay).await;
        }
        if self.broken_views.contains(view) {
            return Err(DomainError::DatabaseError("broken view".to_string()));
        }
        self.completed_refreshes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn refresh_blocking(&self, view: &str) -> Result<(), DomainError> {
        if self.broken_views.contains(view) {
            return Err(DomainError::DatabaseError("broken view".to_string()));
        }
        Ok(())
    }
}
