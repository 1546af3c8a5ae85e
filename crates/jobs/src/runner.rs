use crate::{CacheCompactionJob, ViewRefreshJob};
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// JobRunner::new()
///     .with_view_refresh(ViewRefreshJob::new(refresh).with_interval(3600))
///     .with_cache_compaction(CacheCompactionJob::new(cache))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    view_refresh: Option<ViewRefreshJob>,
    cache_compaction: Option<CacheCompactionJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            view_refresh: None,
            cache_compaction: None,
        }
    }

    pub fn with_view_refresh(mut self, job: ViewRefreshJob) -> Self {
        self.view_refresh = Some(job);
        self
    }

    pub fn with_cache_compaction(mut self, job: CacheCompactionJob) -> Self {
        self.cache_compaction = Some(job);
        self
    }

    /// Start all registered background jobs.
    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.view_refresh {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.cache_compaction {
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
