use axum::{extract::State, Json};

use farebox_store::summary::{self, DashboardSummary};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/summary
pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = summary::dashboard_summary(&state.db.pool).await?;
    Ok(Json(summary))
}
