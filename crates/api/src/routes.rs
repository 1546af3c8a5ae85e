use crate::handlers;
use crate::middleware::cached;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;

pub const VIEWS_REPORT_TTL: Duration = Duration::from_secs(5 * 60);

/// Creates all API routes with state
pub fn create_api_routes(state: AppState) -> Router {
    let views_cache = state
        .response_cache
        .as_ref()
        .map(|cache| cache.with_ttl(VIEWS_REPORT_TTL));

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/refresh", post(handlers::trigger_refresh))
        .route("/api/views", cached(get(handlers::get_views_report), views_cache))
        .route("/metrics", get(handlers::get_metrics))
        .with_state(state)
}
