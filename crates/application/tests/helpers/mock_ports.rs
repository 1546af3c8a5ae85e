use async_trait::async_trait;
use bytes::Bytes;
use ferrous_reports_application::ports::{CacheBackend, MetricsSink, RefreshExecutor, RefreshTiming};
use ferrous_reports_domain::DomainError;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

// ============================================================================
// Mock CacheBackend
// ============================================================================

pub struct MockCacheBackend {
    entries: Mutex<HashMap<String, (Bytes, Instant)>>,
    get_calls: AtomicU64,
    set_calls: AtomicU64,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
}

impl MockCacheBackend {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            get_calls: AtomicU64::new(0),
            set_calls: AtomicU64::new(0),
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let backend = Self::new();
        backend.set_fail_get(true);
        backend.set_fail_set(true);
        backend
    }

    pub fn set_fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::Relaxed);
    }

    pub fn insert_raw(&self, key: &str, raw: &[u8], ttl: Duration) {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            (Bytes::copy_from_slice(raw), Instant::now() + ttl),
        );
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn get_calls(&self) -> u64 {
        self.get_calls.load(Ordering::Relaxed)
    }

    pub fn set_calls(&self) -> u64 {
        self.set_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CacheBackend for MockCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError> {
        self.get_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_get.load(Ordering::Relaxed) {
            return Err(DomainError::CacheBackend("connection refused".to_string()));
        }
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), DomainError> {
        self.set_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_set.load(Ordering::Relaxed) {
            return Err(DomainError::CacheBackend("connection refused".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, Instant::now() + ttl));
        Ok(())
    }
}

// ============================================================================
// Mock RefreshExecutor
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorCall {
    RowCount(String),
    Concurrent(String),
    Blocking(String),
}

pub struct MockRefreshExecutor {
    row_counts: Mutex<HashMap<String, i64>>,
    failing_row_count: Mutex<HashSet<String>>,
    failing_concurrent: Mutex<HashSet<String>>,
    failing_blocking: Mutex<HashSet<String>>,
    hanging: Mutex<HashSet<String>>,
    refresh_delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<ExecutorCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockRefreshExecutor {
    pub fn new() -> Self {
        Self {
            row_counts: Mutex::new(HashMap::new()),
            failing_row_count: Mutex::new(HashSet::new()),
            failing_concurrent: Mutex::new(HashSet::new()),
            failing_blocking: Mutex::new(HashSet::new()),
            hanging: Mutex::new(HashSet::new()),
            refresh_delay: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_row_count(self, view: &str, rows: i64) -> Self {
        self.row_counts.lock().unwrap().insert(view.to_string(), rows);
        self
    }

    pub fn with_failing_row_count(self, view: &str) -> Self {
        self.failing_row_count.lock().unwrap().insert(view.to_string());
        self
    }

    pub fn with_failing_concurrent(self, view: &str) -> Self {
        self.failing_concurrent.lock().unwrap().insert(view.to_string());
        self
    }

    pub fn with_failing_blocking(self, view: &str) -> Self {
        self.failing_blocking.lock().unwrap().insert(view.to_string());
        self
    }

    /// Every refresh of `view` waits forever.
    pub fn with_hanging(self, view: &str) -> Self {
        self.hanging.lock().unwrap().insert(view.to_string());
        self
    }

    pub fn with_refresh_delay(self, delay: Duration) -> Self {
        *self.refresh_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn concurrent_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ExecutorCall::Concurrent(_)))
            .count()
    }

    pub fn blocking_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ExecutorCall::Blocking(_)))
            .count()
    }

    pub fn calls_for(&self, view: &str) -> Vec<ExecutorCall> {
        self.calls()
            .into_iter()
            .filter(|c| match c {
                ExecutorCall::RowCount(v) | ExecutorCall::Concurrent(v) | ExecutorCall::Blocking(v) => {
                    v == view
                }
            })
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn simulate_refresh(&self, view: &str, failing: &Mutex<HashSet<String>>) -> Result<(), DomainError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let hangs = self.hanging.lock().unwrap().contains(view);
        let delay = *self.refresh_delay.lock().unwrap();
        if hangs {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if failing.lock().unwrap().contains(view) {
            return Err(DomainError::DatabaseError(format!(
                "cannot refresh materialized view \"{view}\""
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RefreshExecutor for MockRefreshExecutor {
    async fn row_count(&self, view: &str) -> Result<i64, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push(ExecutorCall::RowCount(view.to_string()));
        if self.failing_row_count.lock().unwrap().contains(view) {
            return Err(DomainError::DatabaseError(format!(
                "relation \"{view}\" does not exist"
            )));
        }
        Ok(self.row_counts.lock().unwrap().get(view).copied().unwrap_or(0))
    }

    async fn refresh_concurrent(&self, view: &str) -> Result<(), DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push(ExecutorCall::Concurrent(view.to_string()));
        self.simulate_refresh(view, &self.failing_concurrent).await
    }

    async fn refresh_blocking(&self, view: &str) -> Result<(), DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push(ExecutorCall::Blocking(view.to_string()));
        self.simulate_refresh(view, &self.failing_blocking).await
    }
}

// ============================================================================
// Recording MetricsSink
// ============================================================================

pub struct RecordingMetricsSink {
    observations: Mutex<Vec<RefreshTiming>>,
    push_configured: bool,
    push_fails: bool,
    push_calls: AtomicU64,
}

impl RecordingMetricsSink {
    pub fn new() -> Self {
        Self {
            observations: Mutex::new(Vec::new()),
            push_configured: false,
            push_fails: false,
            push_calls: AtomicU64::new(0),
        }
    }

    pub fn with_push(push_fails: bool) -> Self {
        Self {
            push_configured: true,
            push_fails,
            ..Self::new()
        }
    }

    pub fn observations(&self) -> Vec<RefreshTiming> {
        self.observations.lock().unwrap().clone()
    }

    pub fn view_observations(&self) -> Vec<String> {
        self.observations()
            .into_iter()
            .filter_map(|o| match o {
                RefreshTiming::View { view, .. } => Some(view),
                RefreshTiming::AllViews { .. } => None,
            })
            .collect()
    }

    pub fn all_views_observations(&self) -> usize {
        self.observations()
            .iter()
            .filter(|o| matches!(o, RefreshTiming::AllViews { .. }))
            .count()
    }

    pub fn push_calls(&self) -> u64 {
        self.push_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MetricsSink for RecordingMetricsSink {
    fn observe(&self, timing: RefreshTiming) {
        self.observations.lock().unwrap().push(timing);
    }

    fn push_configured(&self) -> bool {
        self.push_configured
    }

    async fn push(&self) -> Result<(), DomainError> {
        self.push_calls.fetch_add(1, Ordering::Relaxed);
        if self.push_fails {
            return Err(DomainError::MetricsPush("gateway unavailable".to_string()));
        }
        Ok(())
    }
}
