use crate::bootstrap::init_database;
use ferrous_reports_api::middleware::ResponseCacheState;
use ferrous_reports_api::{AppState, VIEWS_REPORT_TTL};
use ferrous_reports_application::ports::RefreshExecutor;
use ferrous_reports_application::services::ResponseCache;
use ferrous_reports_application::use_cases::RefreshMaterializedViewsUseCase;
use ferrous_reports_domain::Config;
use ferrous_reports_infrastructure::cache::InMemoryCacheBackend;
use ferrous_reports_infrastructure::metrics::prometheus_sink::PrometheusMetricsSink;
use ferrous_reports_infrastructure::refresh::PostgresRefreshExecutor;
use ferrous_reports_jobs::{CacheCompactionJob, JobRunner, ViewRefreshJob};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct Services {
    pub state: AppState,
    refresh: Option<Arc<RefreshMaterializedViewsUseCase>>,
    cache_backend: Option<Arc<InMemoryCacheBackend>>,
}

impl Services {
    pub async fn build(config: &Config, shutdown: CancellationToken) -> anyhow::Result<Self> {
        let catalog = Arc::new(config.view_catalog()?);
        let metrics = Arc::new(PrometheusMetricsSink::new(&config.metrics)?);

        let executor: Option<Arc<dyn RefreshExecutor>> = match config.database.url.as_deref() {
            Some(url) => {
                let pool = init_database(url, &config.database).await?;
                Some(Arc::new(PostgresRefreshExecutor::new(pool)))
            }
            None => {
                info!("No database configured, materialized view refresh is disabled");
                None
            }
        };

        let refresh = executor.clone().map(|executor| {
            Arc::new(
                RefreshMaterializedViewsUseCase::new(executor, metrics.clone(), catalog.clone())
                    .with_workers(config.refresh.workers)
                    .with_view_timeout(Duration::from_secs(config.refresh.view_timeout_secs))
                    .with_cancellation(shutdown.clone()),
            )
        });

        let cache_backend = config
            .cache
            .enabled
            .then(|| Arc::new(InMemoryCacheBackend::new(config.cache.max_entries)));

        let response_cache = cache_backend.as_ref().map(|backend| {
            ResponseCacheState::new(
                Arc::new(ResponseCache::new(backend.clone())),
                VIEWS_REPORT_TTL,
            )
            .with_max_body_bytes(config.cache.max_body_bytes)
        });

        if response_cache.is_none() {
            info!("Response cache disabled, reports are always computed live");
        }

        let state = AppState {
            refresh: refresh.clone(),
            views: executor,
            catalog,
            metrics,
            response_cache,
        };

        Ok(Self {
            state,
            refresh,
            cache_backend,
        })
    }

    pub fn job_runner(&self, config: &Config, shutdown: &CancellationToken) -> JobRunner {
        let mut runner = JobRunner::new();

        if let Some(refresh) = &self.refresh {
            runner = runner.with_view_refresh(
                ViewRefreshJob::new(refresh.clone())
                    .with_startup_refresh(config.refresh.refresh_on_startup)
                    .with_interval(config.refresh.interval_secs)
                    .with_cancellation(shutdown.clone()),
            );
        }

        if let Some(cache) = &self.cache_backend {
            runner = runner.with_cache_compaction(
                CacheCompactionJob::new(cache.clone())
                    .with_interval(config.cache.compaction_interval_secs)
                    .with_cancellation(shutdown.clone()),
            );
        }

        runner
    }
}
