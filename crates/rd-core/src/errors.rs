//! Domain error types for the delivery workflow.
//!
//! `CoreError` is the typed failure every workflow operation can return.
//! Storage errors live in `rd-db::DatabaseError`, which wraps this type; the
//! binaries convert everything to `anyhow` at the edge.

use serde::Serialize;
use thiserror::Error;

use crate::enums::EntityType;

/// Broad classes of failure, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed input. Rejected before any mutation; retry after correcting.
    Validation,
    /// Conflicts with current state. Not retried automatically.
    StateConflict,
    /// Business rule rejection with an actionable message.
    GateViolation,
    /// Unknown id.
    NotFound,
    /// The store itself failed.
    Storage,
}

/// Errors raised by workflow operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation (empty title, out-of-range score, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: EntityType,
        id: String,
        from: String,
        to: String,
    },

    /// The company already has an active assignment to the sub-project.
    #[error("Company {company_id} is already assigned to sub-project {sub_project_id}")]
    AlreadyAssigned {
        sub_project_id: String,
        company_id: String,
    },

    /// The company has no active assignment to the sub-project.
    #[error("Company {company_id} is not assigned to sub-project {sub_project_id}")]
    NotAssigned {
        sub_project_id: String,
        company_id: String,
    },

    /// An assignment batch named no companies.
    #[error("No companies selected")]
    EmptySelection,

    /// The company is not actively assigned to the task's sub-project.
    #[error("Company {company_id} is not assigned to the sub-project of task {task_id}")]
    UnknownCompany { task_id: String, company_id: String },

    /// The report gate rejected the request.
    #[error(
        "Evaluation report not allowed for sub-project {sub_project_id}: {completed} of {total} tasks completed; complete all tasks first"
    )]
    GateNotSatisfied {
        sub_project_id: String,
        completed: u32,
        total: u32,
    },

    /// A report already exists for the (sub-project, company) pair.
    #[error("An evaluation report already exists for company {company_id} in sub-project {sub_project_id}")]
    DuplicateReport {
        sub_project_id: String,
        company_id: String,
    },

    /// The entity still owns children and cannot be deleted.
    #[error("{entity_type} {id} still has {count} dependent record(s)")]
    HasDependents {
        entity_type: EntityType,
        id: String,
        count: u32,
    },
}

impl CoreError {
    /// Shorthand for `CoreError::NotFound`.
    pub fn not_found(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::EmptySelection => ErrorCategory::Validation,
            Self::NotFound { .. } | Self::UnknownCompany { .. } => ErrorCategory::NotFound,
            Self::InvalidTransition { .. }
            | Self::AlreadyAssigned { .. }
            | Self::NotAssigned { .. }
            | Self::DuplicateReport { .. }
            | Self::HasDependents { .. } => ErrorCategory::StateConflict,
            Self::GateNotSatisfied { .. } => ErrorCategory::GateViolation,
        }
    }

    /// Stable machine-readable code for API responses.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::AlreadyAssigned { .. } => "ALREADY_ASSIGNED",
            Self::NotAssigned { .. } => "NOT_ASSIGNED",
            Self::EmptySelection => "EMPTY_SELECTION",
            Self::UnknownCompany { .. } => "UNKNOWN_COMPANY",
            Self::GateNotSatisfied { .. } => "GATE_NOT_SATISFIED",
            Self::DuplicateReport { .. } => "DUPLICATE_REPORT",
            Self::HasDependents { .. } => "HAS_DEPENDENTS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_group_failures() {
        assert_eq!(
            CoreError::Validation("x".into()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(CoreError::EmptySelection.category(), ErrorCategory::Validation);
        assert_eq!(
            CoreError::DuplicateReport {
                sub_project_id: "spj-1".into(),
                company_id: "cmp-1".into(),
            }
            .category(),
            ErrorCategory::StateConflict
        );
        assert_eq!(
            CoreError::GateNotSatisfied {
                sub_project_id: "spj-1".into(),
                completed: 1,
                total: 2,
            }
            .category(),
            ErrorCategory::GateViolation
        );
        assert_eq!(
            CoreError::not_found(EntityType::Task, "tsk-1").category(),
            ErrorCategory::NotFound
        );
    }

    #[test]
    fn gate_message_is_actionable() {
        let err = CoreError::GateNotSatisfied {
            sub_project_id: "spj-1".into(),
            completed: 1,
            total: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("1 of 3"));
        assert!(msg.contains("complete all tasks first"));
    }
}
