use ferrous_reports_application::ports::CacheCompactor;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct CacheCompactionJob {
    cache: Arc<dyn CacheCompactor>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheCompactionJob {
    pub fn new(cache: Arc<dyn CacheCompactor>) -> Self {
        Self {
            cache,
            interval_secs: 300,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting response cache compaction job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheCompactionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = self.cache.purge_expired().await;
                        if removed > 0 {
                            info!(
                                removed,
                                remaining = self.cache.entry_count(),
                                "Response cache compaction completed"
                            );
                        } else {
                            debug!("No expired cache entries to purge");
                        }
                    }
                }
            }
        });
    }
}
