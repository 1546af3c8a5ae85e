use async_trait::async_trait;
use ferrous_reports_application::ports::{CacheCompactor, RefreshExecutor};
use ferrous_reports_domain::DomainError;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

// ============================================================================
// Counting RefreshExecutor
// ============================================================================

pub struct CountingRefreshExecutor {
    rows_per_view: i64,
    row_count_calls: AtomicU64,
    concurrent_calls: AtomicU64,
    blocking_calls: AtomicU64,
}

impl CountingRefreshExecutor {
    pub fn empty_views() -> Self {
        Self::with_rows(0)
    }

    pub fn populated_views() -> Self {
        Self::with_rows(1_000)
    }

    fn with_rows(rows_per_view: i64) -> Self {
        Self {
            rows_per_view,
            row_count_calls: AtomicU64::new(0),
            concurrent_calls: AtomicU64::new(0),
            blocking_calls: AtomicU64::new(0),
        }
    }

    pub fn row_count_calls(&self) -> u64 {
        self.row_count_calls.load(Ordering::Relaxed)
    }

    pub fn concurrent_calls(&self) -> u64 {
        self.concurrent_calls.load(Ordering::Relaxed)
    }

    pub fn blocking_calls(&self) -> u64 {
        self.blocking_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RefreshExecutor for CountingRefreshExecutor {
    async fn row_count(&self, _view: &str) -> Result<i64, DomainError> {
        self.row_count_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.rows_per_view)
    }

    async fn refresh_concurrent(&self, _view: &str) -> Result<(), DomainError> {
        self.concurrent_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn refresh_blocking(&self, _view: &str) -> Result<(), DomainError> {
        self.blocking_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

// ============================================================================
// Counting CacheCompactor
// ============================================================================

pub struct CountingCompactor {
    purge_calls: AtomicU64,
    expired_per_purge: AtomicUsize,
}

impl CountingCompactor {
    pub fn new(expired_per_purge: usize) -> Self {
        Self {
            purge_calls: AtomicU64::new(0),
            expired_per_purge: AtomicUsize::new(expired_per_purge),
        }
    }

    pub fn purge_calls(&self) -> u64 {
        self.purge_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CacheCompactor for CountingCompactor {
    async fn purge_expired(&self) -> usize {
        self.purge_calls.fetch_add(1, Ordering::Relaxed);
        self.expired_per_purge.load(Ordering::Relaxed)
    }

    fn entry_count(&self) -> usize {
        0
    }
}
