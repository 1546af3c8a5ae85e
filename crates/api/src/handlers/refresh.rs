use crate::{dto::RefreshQuery, state::AppState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use ferrous_reports_domain::RefreshMode;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Runs one full refresh cycle and answers once it has finished.
///
/// The cycle runs on its own task, so it completes even when the client
/// disconnects first. Per-view results are only visible in logs and metrics.
#[instrument(skip(state), name = "api_trigger_refresh")]
pub async fn trigger_refresh(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> StatusCode {
    let Some(refresh) = state.refresh.as_ref().map(Arc::clone) else {
        warn!("Refresh requested but no database is configured");
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    let skip_if_populated = query.skip_if_populated;
    let cycle = tokio::spawn(async move { refresh.execute(skip_if_populated).await });

    match cycle.await {
        Ok(report) => {
            info!(
                elapsed_ms = report.elapsed_ms,
                refreshed = report.outcomes.iter().filter(|o| o.mode.is_refreshed()).count(),
                failed = report.count(RefreshMode::Failed),
                "Requested view refresh completed"
            );
            StatusCode::NO_CONTENT
        }
        Err(e) => {
            error!(error = %e, "Refresh cycle task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
