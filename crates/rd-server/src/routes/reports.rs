//! Report gate and evaluation report endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use rd_core::entities::EvaluationReport;
use rd_core::responses::EligibilityResponse;

use crate::error::{ApiResult, api_error};
use crate::state::AppState;
use crate::types::CreateReportRequest;

/// GET /api/sub-projects/:id/companies/:company/eligibility
pub async fn eligibility(
    State(state): State<Arc<AppState>>,
    Path((sub_project_id, company_id)): Path<(String, String)>,
) -> ApiResult<Json<EligibilityResponse>> {
    let gate = state
        .service
        .report_eligibility(&sub_project_id, &company_id)
        .await
        .map_err(api_error)?;
    Ok(Json(gate))
}

/// POST /api/sub-projects/:id/reports
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(sub_project_id): Path<String>,
    Json(request): Json<CreateReportRequest>,
) -> ApiResult<(StatusCode, Json<EvaluationReport>)> {
    let report = state
        .service
        .create_report(
            &state.actor(&headers),
            &sub_project_id,
            &request.company_id,
            request.scores,
            request.texts,
        )
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/sub-projects/:id/reports
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Path(sub_project_id): Path<String>,
) -> ApiResult<Json<Vec<EvaluationReport>>> {
    let reports = state
        .service
        .list_reports(&sub_project_id)
        .await
        .map_err(api_error)?;
    Ok(Json(reports))
}

/// GET /api/sub-projects/:id/reports/:company
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path((sub_project_id, company_id)): Path<(String, String)>,
) -> ApiResult<Json<EvaluationReport>> {
    let report = state
        .service
        .get_report(&sub_project_id, &company_id)
        .await
        .map_err(api_error)?;
    Ok(Json(report))
}
