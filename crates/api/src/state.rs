use crate::middleware::ResponseCacheState;
use ferrous_reports_application::ports::RefreshExecutor;
use ferrous_reports_application::use_cases::RefreshMaterializedViewsUseCase;
use ferrous_reports_domain::ViewCatalog;
use ferrous_reports_infrastructure::metrics::prometheus_sink::PrometheusMetricsSink;
use std::sync::Arc;

/// Shared handler state.
///
/// `refresh` and `views` are `None` when no database is configured; the
/// routes that need them answer 503 in that case.
#[derive(Clone)]
pub struct AppState {
    pub refresh: Option<Arc<RefreshMaterializedViewsUseCase>>,
    pub views: Option<Arc<dyn RefreshExecutor>>,
    pub catalog: Arc<ViewCatalog>,
    pub metrics: Arc<PrometheusMetricsSink>,
    pub response_cache: Option<ResponseCacheState>,
}
