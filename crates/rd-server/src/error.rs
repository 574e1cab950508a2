//! Error responses.
//!
//! Every failure leaves the API as `{ "error": message, "code": CODE }` with a
//! status chosen by the error's category.

use axum::Json;
use axum::http::StatusCode;
use rd_core::errors::ErrorCategory;
use rd_db::error::DatabaseError;

use crate::types::ErrorResponse;

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = Result<T, ApiError>;

#[must_use]
pub const fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::Validation => StatusCode::BAD_REQUEST,
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::StateConflict => StatusCode::CONFLICT,
        ErrorCategory::GateViolation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCategory::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a service error to its HTTP response.
#[allow(clippy::needless_pass_by_value)]
pub fn api_error(err: DatabaseError) -> ApiError {
    let status = status_for(err.category());
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed in the store");
    } else {
        tracing::debug!(error = %err, %status, "request rejected");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_core::errors::CoreError;

    #[test]
    fn gate_violation_is_unprocessable() {
        let (status, Json(body)) = api_error(
            CoreError::GateNotSatisfied {
                sub_project_id: "spj-1".into(),
                completed: 1,
                total: 3,
            }
            .into(),
        );
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, "GATE_NOT_SATISFIED");
        assert!(body.error.contains("1 of 3"));
    }

    #[test]
    fn storage_failures_are_internal() {
        let (status, Json(body)) = api_error(DatabaseError::NoResult);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "STORAGE_ERROR");
    }
}
