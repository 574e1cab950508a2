//! Project endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use rd_core::entities::Project;
use rd_db::repos::project::NewProject;

use crate::error::{ApiResult, api_error};
use crate::state::AppState;
use crate::types::{CreateProjectRequest, DeliveryTransitionRequest, ListQuery};

/// GET /api/projects
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state
        .service
        .list_projects(state.limit(query.limit))
        .await
        .map_err(api_error)?;
    Ok(Json(projects))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let new = NewProject {
        name: request.name,
        description: request.description,
        start_date: request.start_date,
        end_date: request.end_date,
        consultant_id: request.consultant_id,
    };
    let project = state
        .service
        .create_project(&state.actor(&headers), new)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Project>> {
    let project = state.service.get_project(&id).await.map_err(api_error)?;
    Ok(Json(project))
}

/// POST /api/projects/:id/transition
pub async fn transition_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<DeliveryTransitionRequest>,
) -> ApiResult<Json<Project>> {
    let project = state
        .service
        .transition_project(&state.actor(&headers), &id, request.status)
        .await
        .map_err(api_error)?;
    Ok(Json(project))
}

/// DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .service
        .delete_project(&state.actor(&headers), &id)
        .await
        .map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}
