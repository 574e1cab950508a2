//! Per-company task schedule endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use rd_core::entities::TaskDateOverride;

use crate::error::{ApiResult, api_error};
use crate::state::AppState;
use crate::types::SetTaskDatesRequest;

/// PUT /api/tasks/:id/companies/:company/dates
pub async fn set_task_dates(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((task_id, company_id)): Path<(String, String)>,
    Json(request): Json<SetTaskDatesRequest>,
) -> ApiResult<Json<TaskDateOverride>> {
    let schedule = state
        .service
        .set_task_dates(
            &state.actor(&headers),
            &task_id,
            &company_id,
            request.start_date,
            request.end_date,
        )
        .await
        .map_err(api_error)?;
    Ok(Json(schedule))
}

/// GET /api/tasks/:id/dates
pub async fn list_task_dates(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<Vec<TaskDateOverride>>> {
    let schedules = state
        .service
        .list_task_dates(&task_id)
        .await
        .map_err(api_error)?;
    Ok(Json(schedules))
}
