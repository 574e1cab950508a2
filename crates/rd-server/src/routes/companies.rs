//! Company endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use rd_core::entities::Company;
use rd_db::repos::company::NewCompany;

use crate::error::{ApiResult, api_error};
use crate::state::AppState;
use crate::types::{ListQuery, RegisterCompanyRequest};

/// GET /api/companies
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Company>>> {
    let companies = state
        .service
        .list_companies(state.limit(query.limit))
        .await
        .map_err(api_error)?;
    Ok(Json(companies))
}

/// POST /api/companies
pub async fn register_company(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<RegisterCompanyRequest>,
) -> ApiResult<(StatusCode, Json<Company>)> {
    let new = NewCompany {
        name: request.name,
        contact_name: request.contact_name,
        contact_email: request.contact_email,
        contact_phone: request.contact_phone,
    };
    let company = state
        .service
        .register_company(&state.actor(&headers), new)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/companies/:id
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Company>> {
    let company = state.service.get_company(&id).await.map_err(api_error)?;
    Ok(Json(company))
}
