//! Request and response bodies for the HTTP API.

use chrono::NaiveDate;
use rd_core::entities::{ReportScores, ReportTexts};
use rd_core::enums::{AuditAction, DeliveryStatus, EntityType, TaskPriority, TaskStatus};
use serde::{Deserialize, Deserializer, Serialize};

/// Present-but-null becomes `Some(None)`, absent stays `None`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Health & errors
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Query strings
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssignmentQuery {
    #[serde(default)]
    pub include_removed: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub actor_id: Option<String>,
    pub limit: Option<u32>,
}

// ============================================================================
// Projects & sub-projects
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub consultant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryTransitionRequest {
    pub status: DeliveryStatus,
}

// ============================================================================
// Tasks
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

/// Partial task edit. `null` clears `description` or `due_date`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Deserialize)]
pub struct TaskTransitionRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct SetTaskDatesRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// ============================================================================
// Companies, assignments, reports
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterCompanyRequest {
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignCompaniesRequest {
    pub company_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub company_id: String,
    #[serde(flatten)]
    pub scores: ReportScores,
    #[serde(flatten)]
    pub texts: ReportTexts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_null_from_absent() {
        let absent: UpdateTaskRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateTaskRequest =
            serde_json::from_str(r#"{"description":null,"due_date":"2024-05-01"}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
        assert_eq!(cleared.due_date, Some(NaiveDate::from_ymd_opt(2024, 5, 1)));
    }

    #[test]
    fn report_request_reads_flat_body() {
        let req: CreateReportRequest = serde_json::from_str(
            r#"{"company_id":"cmp-1","overall_rating":5,"quality_rating":4,
                "timeliness_rating":3,"communication_rating":2,"strengths":"Fast"}"#,
        )
        .unwrap();
        assert_eq!(req.scores.communication_rating, 2);
        assert_eq!(req.texts.strengths.as_deref(), Some("Fast"));
        assert_eq!(req.texts.recommendations, None);
    }
}
