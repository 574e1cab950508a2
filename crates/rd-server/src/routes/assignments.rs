//! Assignment and progress endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use rd_core::entities::CompanyAssignment;
use rd_core::responses::CompanyProgressResponse;

use crate::error::{ApiResult, api_error};
use crate::state::AppState;
use crate::types::{AssignCompaniesRequest, AssignmentQuery};

/// GET /api/sub-projects/:id/assignments
pub async fn list_assignments(
    State(state): State<Arc<AppState>>,
    Path(sub_project_id): Path<String>,
    Query(query): Query<AssignmentQuery>,
) -> ApiResult<Json<Vec<CompanyAssignment>>> {
    let assignments = state
        .service
        .list_assignments(&sub_project_id, query.include_removed)
        .await
        .map_err(api_error)?;
    Ok(Json(assignments))
}

/// POST /api/sub-projects/:id/assignments
///
/// Responds with only the assignments this request created or reactivated.
pub async fn assign_companies(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(sub_project_id): Path<String>,
    Json(request): Json<AssignCompaniesRequest>,
) -> ApiResult<(StatusCode, Json<Vec<CompanyAssignment>>)> {
    let created = state
        .service
        .assign_companies(&state.actor(&headers), &sub_project_id, &request.company_ids)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/sub-projects/:id/assignments/:company
pub async fn remove_assignment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((sub_project_id, company_id)): Path<(String, String)>,
) -> ApiResult<Json<CompanyAssignment>> {
    let removed = state
        .service
        .remove_assignment(&state.actor(&headers), &sub_project_id, &company_id)
        .await
        .map_err(api_error)?;
    Ok(Json(removed))
}

/// GET /api/sub-projects/:id/companies/:company/progress
pub async fn company_progress(
    State(state): State<Arc<AppState>>,
    Path((sub_project_id, company_id)): Path<(String, String)>,
) -> ApiResult<Json<CompanyProgressResponse>> {
    let progress = state
        .service
        .company_progress(&sub_project_id, &company_id)
        .await
        .map_err(api_error)?;
    Ok(Json(progress))
}
