//! Sub-project endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use rd_core::entities::SubProject;
use rd_db::repos::sub_project::NewSubProject;

use crate::error::{ApiResult, api_error};
use crate::state::AppState;
use crate::types::{CreateSubProjectRequest, DeliveryTransitionRequest};

/// GET /api/projects/:id/sub-projects
pub async fn list_sub_projects(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Vec<SubProject>>> {
    let sub_projects = state
        .service
        .list_sub_projects(&project_id)
        .await
        .map_err(api_error)?;
    Ok(Json(sub_projects))
}

/// POST /api/projects/:id/sub-projects
pub async fn create_sub_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(project_id): Path<String>,
    Json(request): Json<CreateSubProjectRequest>,
) -> ApiResult<(StatusCode, Json<SubProject>)> {
    let new = NewSubProject {
        name: request.name,
        description: request.description,
        start_date: request.start_date,
        end_date: request.end_date,
    };
    let sub_project = state
        .service
        .create_sub_project(&state.actor(&headers), &project_id, new)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(sub_project)))
}

/// GET /api/sub-projects/:id
pub async fn get_sub_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SubProject>> {
    let sub_project = state.service.get_sub_project(&id).await.map_err(api_error)?;
    Ok(Json(sub_project))
}

/// POST /api/sub-projects/:id/transition
pub async fn transition_sub_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<DeliveryTransitionRequest>,
) -> ApiResult<Json<SubProject>> {
    let sub_project = state
        .service
        .transition_sub_project(&state.actor(&headers), &id, request.status)
        .await
        .map_err(api_error)?;
    Ok(Json(sub_project))
}
