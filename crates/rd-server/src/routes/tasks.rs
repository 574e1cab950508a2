//! Task endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use rd_core::entities::Task;
use rd_db::repos::task::NewTask;
use rd_db::updates::task::TaskUpdate;

use crate::error::{ApiResult, api_error};
use crate::state::AppState;
use crate::types::{CreateTaskRequest, TaskTransitionRequest, UpdateTaskRequest};

/// GET /api/sub-projects/:id/tasks
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Path(sub_project_id): Path<String>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state
        .service
        .list_tasks(&sub_project_id)
        .await
        .map_err(api_error)?;
    Ok(Json(tasks))
}

/// POST /api/sub-projects/:id/tasks
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(sub_project_id): Path<String>,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let new = NewTask {
        title: request.title,
        description: request.description,
        priority: request.priority,
        due_date: request.due_date,
    };
    let task = state
        .service
        .create_task(&state.actor(&headers), &sub_project_id, new)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let task = state.service.get_task(&id).await.map_err(api_error)?;
    Ok(Json(task))
}

/// PATCH /api/tasks/:id
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let update = TaskUpdate {
        title: request.title,
        description: request.description,
        priority: request.priority,
        due_date: request.due_date,
    };
    let task = state
        .service
        .update_task(&state.actor(&headers), &id, update)
        .await
        .map_err(api_error)?;
    Ok(Json(task))
}

/// POST /api/tasks/:id/transition
pub async fn transition_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<TaskTransitionRequest>,
) -> ApiResult<Json<Task>> {
    let task = state
        .service
        .transition_task(&state.actor(&headers), &id, request.status)
        .await
        .map_err(api_error)?;
    Ok(Json(task))
}
