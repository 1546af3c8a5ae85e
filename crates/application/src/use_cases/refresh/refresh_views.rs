use crate::ports::{MetricsSink, RefreshExecutor, RefreshTiming};
use ferrous_reports_domain::{
    DomainError, RefreshCycleReport, RefreshMode, RefreshOutcome, ViewCatalog, ViewRefreshTask,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub const DEFAULT_REFRESH_WORKERS: usize = 3;
pub const DEFAULT_VIEW_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Refreshes every view of the catalog with a fixed-size worker pool.
///
/// Each cycle attempts every view exactly once. A concurrent refresh that
/// fails is retried once in blocking mode; anything that still fails is
/// logged and recorded for that view alone. The cycle itself never fails.
///
/// Only one cycle runs at a time; overlapping calls wait their turn.
pub struct RefreshMaterializedViewsUseCase {
    executor: Arc<dyn RefreshExecutor>,
    metrics: Arc<dyn MetricsSink>,
    catalog: Arc<ViewCatalog>,
    workers: usize,
    view_timeout: Duration,
    shutdown: CancellationToken,
    cycle: Mutex<()>,
}

impl RefreshMaterializedViewsUseCase {
    pub fn new(
        executor: Arc<dyn RefreshExecutor>,
        metrics: Arc<dyn MetricsSink>,
        catalog: Arc<ViewCatalog>,
    ) -> Self {
        Self {
            executor,
            metrics,
            catalog,
            workers: DEFAULT_REFRESH_WORKERS,
            view_timeout: DEFAULT_VIEW_TIMEOUT,
            shutdown: CancellationToken::new(),
            cycle: Mutex::new(()),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_view_timeout(mut self, timeout: Duration) -> Self {
        self.view_timeout = timeout;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn catalog(&self) -> &ViewCatalog {
        &self.catalog
    }

    /// Run one refresh cycle and wait for every worker to finish.
    ///
    /// With `skip_if_populated`, views that already hold rows are left alone;
    /// this is how the startup refresh only fills empty views.
    pub async fn execute(&self, skip_if_populated: bool) -> RefreshCycleReport {
        let _cycle = self.cycle.lock().await;

        info!(
            views = self.catalog.len(),
            workers = self.workers,
            skip_if_populated,
            "Refreshing materialized views"
        );
        let started = Instant::now();

        let (tx, rx) = mpsc::channel::<ViewRefreshTask>(1);
        let queue = Arc::new(Mutex::new(rx));
        let worker = Arc::new(RefreshWorker {
            executor: Arc::clone(&self.executor),
            metrics: Arc::clone(&self.metrics),
            view_timeout: self.view_timeout,
            shutdown: self.shutdown.clone(),
            skip_if_populated,
        });

        let mut pool = JoinSet::new();
        for id in 0..self.workers {
            pool.spawn(Arc::clone(&worker).run(id, Arc::clone(&queue)));
        }

        for task in self.catalog.tasks() {
            if let Err(unsent) = tx.send(task).await {
                error!(
                    view = %unsent.0.view_name,
                    "No refresh worker left to take view, abandoning the rest of the cycle"
                );
                break;
            }
        }
        drop(tx);

        let mut outcomes = Vec::with_capacity(self.catalog.len());
        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok(mut finished) => outcomes.append(&mut finished),
                Err(e) => error!(error = %e, "Refresh worker terminated abnormally"),
            }
        }

        let elapsed = started.elapsed();
        let report = RefreshCycleReport {
            outcomes,
            elapsed_ms: elapsed.as_millis() as u64,
        };

        info!(
            elapsed_ms = report.elapsed_ms,
            concurrent = report.count(RefreshMode::ConcurrentSucceeded),
            fallback = report.count(RefreshMode::FallbackSucceeded),
            failed = report.count(RefreshMode::Failed),
            skipped = report.count(RefreshMode::Skipped),
            "Refreshed all materialized views"
        );
        self.metrics.observe(RefreshTiming::AllViews {
            millis: elapsed.as_millis() as f64,
        });

        if self.metrics.push_configured() {
            info!("Pushing refresh metrics to pushgateway");
            match self.metrics.push().await {
                Ok(()) => info!("Pushed refresh metrics to pushgateway"),
                Err(e) => error!(error = %e, "Could not push refresh metrics to pushgateway"),
            }
        }

        report
    }
}

/// State shared by the pool's tasks for one cycle.
struct RefreshWorker {
    executor: Arc<dyn RefreshExecutor>,
    metrics: Arc<dyn MetricsSink>,
    view_timeout: Duration,
    shutdown: CancellationToken,
    skip_if_populated: bool,
}

impl RefreshWorker {
    async fn run(
        self: Arc<Self>,
        id: usize,
        queue: Arc<Mutex<mpsc::Receiver<ViewRefreshTask>>>,
    ) -> Vec<RefreshOutcome> {
        let mut outcomes = Vec::new();
        loop {
            let next = queue.lock().await.recv().await;
            let Some(task) = next else { break };
            outcomes.push(self.refresh(task).await);
        }
        debug!(worker = id, processed = outcomes.len(), "Refresh worker finished");
        outcomes
    }

    async fn refresh(&self, task: ViewRefreshTask) -> RefreshOutcome {
        let view = task.view_name;

        if self.skip_if_populated {
            match self.bounded(&view, self.executor.row_count(&view)).await {
                Ok(rows) if rows > 0 => {
                    info!(
                        view = %view,
                        rows,
                        "Skipping materialized view refresh as it appears to be populated"
                    );
                    return RefreshOutcome::skipped(view);
                }
                Ok(_) => {}
                Err(e) => warn!(
                    view = %view,
                    error = %e,
                    "Could not count rows, proceeding with materialized view refresh"
                ),
            }
        }

        info!(view = %view, "Refreshing materialized view");
        let started = Instant::now();

        match self
            .bounded(&view, self.executor.refresh_concurrent(&view))
            .await
        {
            Ok(()) => self.succeeded(view, started, RefreshMode::ConcurrentSucceeded),
            Err(e @ DomainError::RefreshCancelled(_)) => self.failed(view, started, e),
            Err(e) => {
                warn!(
                    view = %view,
                    error = %e,
                    "Error refreshing materialized view concurrently, falling back to blocking refresh"
                );
                match self
                    .bounded(&view, self.executor.refresh_blocking(&view))
                    .await
                {
                    Ok(()) => self.succeeded(view, started, RefreshMode::FallbackSucceeded),
                    Err(e) => self.failed(view, started, e),
                }
            }
        }
    }

    /// Race an executor call against the per-view timeout and shutdown.
    async fn bounded<T, F>(&self, view: &str, op: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(DomainError::RefreshCancelled(view.to_string())),
            result = tokio::time::timeout(self.view_timeout, op) => {
                result.unwrap_or_else(|_| Err(DomainError::RefreshTimeout {
                    view: view.to_string(),
                    timeout_secs: self.view_timeout.as_secs(),
                }))
            }
        }
    }

    fn succeeded(&self, view: Arc<str>, started: Instant, mode: RefreshMode) -> RefreshOutcome {
        let elapsed = started.elapsed();
        info!(
            view = %view,
            elapsed_ms = elapsed.as_millis() as u64,
            mode = %mode,
            "Refreshed materialized view"
        );
        self.metrics.observe(RefreshTiming::View {
            view: view.to_string(),
            millis: elapsed.as_millis() as f64,
        });
        RefreshOutcome {
            view_name: view,
            duration_ms: elapsed.as_millis() as u64,
            mode,
            error: None,
        }
    }

    fn failed(&self, view: Arc<str>, started: Instant, error: DomainError) -> RefreshOutcome {
        error!(view = %view, error = %error, "Error refreshing materialized view");
        RefreshOutcome {
            view_name: view,
            duration_ms: started.elapsed().as_millis() as u64,
            mode: RefreshMode::Failed,
            error: Some(error),
        }
    }
}
