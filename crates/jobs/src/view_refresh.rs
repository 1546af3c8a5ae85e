use ferrous_reports_application::use_cases::RefreshMaterializedViewsUseCase;
use ferrous_reports_domain::RefreshMode;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Drives refresh cycles outside of request handling: once at startup for
/// views that are still empty, then on a fixed interval when one is set.
pub struct ViewRefreshJob {
    refresh: Arc<RefreshMaterializedViewsUseCase>,
    refresh_on_startup: bool,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ViewRefreshJob {
    pub fn new(refresh: Arc<RefreshMaterializedViewsUseCase>) -> Self {
        Self {
            refresh,
            refresh_on_startup: true,
            interval_secs: 0,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_startup_refresh(mut self, enabled: bool) -> Self {
        self.refresh_on_startup = enabled;
        self
    }

    /// 0 disables the periodic refresh.
    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            startup = self.refresh_on_startup,
            interval_secs = self.interval_secs,
            "Starting view refresh job"
        );

        tokio::spawn(async move {
            if self.refresh_on_startup {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ViewRefreshJob: shutting down");
                        return;
                    }
                    report = self.refresh.execute(true) => {
                        info!(
                            skipped = report.count(RefreshMode::Skipped),
                            failed = report.count(RefreshMode::Failed),
                            "Startup view refresh completed"
                        );
                    }
                }
            }

            if self.interval_secs == 0 {
                return;
            }

            let period = Duration::from_secs(self.interval_secs);
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ViewRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let report = self.refresh.execute(false).await;
                        info!(
                            elapsed_ms = report.elapsed_ms,
                            failed = report.count(RefreshMode::Failed),
                            "Periodic view refresh completed"
                        );
                    }
                }
            }
        });
    }
}
