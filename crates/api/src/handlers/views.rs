use crate::{
    dto::{ViewRowCount, ViewsReportResponse},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, instrument, warn};

#[instrument(skip(state), name = "api_get_views_report")]
pub async fn get_views_report(
    State(state): State<AppState>,
) -> Result<Json<ViewsReportResponse>, (StatusCode, String)> {
    let Some(executor) = state.views.as_ref() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "No database configured".to_string(),
        ));
    };

    let mut views = Vec::with_capacity(state.catalog.len());
    for view in state.catalog.views() {
        let row = match executor.row_count(&view.name).await {
            Ok(rows) => ViewRowCount {
                name: view.name.to_string(),
                rows: Some(rows),
                error: None,
            },
            Err(e) => {
                warn!(view = %view.name, error = %e, "Failed to count view rows");
                ViewRowCount {
                    name: view.name.to_string(),
                    rows: None,
                    error: Some(e.to_string()),
                }
            }
        };
        views.push(row);
    }

    debug!(count = views.len(), "Views report computed");

    Ok(Json(ViewsReportResponse {
        generated_at: chrono::Utc::now().to_rfc3339(),
        views,
    }))
}
