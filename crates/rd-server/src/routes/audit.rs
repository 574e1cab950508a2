//! Audit trail endpoint

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use rd_core::entities::AuditEntry;
use rd_db::repos::audit::AuditFilter;

use crate::error::{ApiResult, api_error};
use crate::state::AppState;
use crate::types::AuditQuery;

/// GET /api/audit
pub async fn query_audit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuditQuery>,
) -> ApiResult<Json<Vec<AuditEntry>>> {
    let filter = AuditFilter {
        entity_type: query.entity_type,
        entity_id: query.entity_id,
        action: query.action,
        actor_id: query.actor_id,
        limit: Some(state.limit(query.limit)),
    };
    let entries = state.service.query_audit(&filter).await.map_err(api_error)?;
    Ok(Json(entries))
}
