//! Status enums, priorities, entity types, and audit actions.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` so that the
//! service layer can reject invalid transitions before touching the store.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DeliveryStatus
// ---------------------------------------------------------------------------

/// Status shared by projects and sub-projects.
///
/// ```text
/// planned → active → completed
///         → on_hold ⇄ active
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Planned,
    Active,
    Completed,
    OnHold,
}

impl DeliveryStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Planned => &[Self::Active, Self::OnHold],
            Self::Active => &[Self::OnHold, Self::Completed],
            Self::OnHold => &[Self::Active],
            Self::Completed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskPriority
// ---------------------------------------------------------------------------

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a task.
///
/// ```text
/// pending ⇄ in_review → completed
///    └──────────┴─────→ cancelled
/// ```
///
/// `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InReview,
    Completed,
    Cancelled,
}

impl TaskStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::InReview, Self::Cancelled],
            Self::InReview => &[Self::Completed, Self::Pending, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Progress percentage a task carries while in this state.
    #[must_use]
    pub const fn progress(self) -> u8 {
        match self {
            Self::Pending | Self::Cancelled => 0,
            Self::InReview => 50,
            Self::Completed => 100,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssignmentStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a company's participation in a sub-project.
///
/// ```text
/// active ⇄ removed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Active,
    Removed,
}

impl AssignmentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Mutation recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    StatusChanged,
    Assigned,
    Unassigned,
    Scheduled,
    Deleted,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged => "status_changed",
            Self::Assigned => "assigned",
            Self::Unassigned => "unassigned",
            Self::Scheduled => "scheduled",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Every persisted entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Project,
    SubProject,
    Task,
    Company,
    Assignment,
    TaskDateOverride,
    EvaluationReport,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::SubProject => "sub_project",
            Self::Task => "task",
            Self::Company => "company",
            Self::Assignment => "assignment",
            Self::TaskDateOverride => "task_date_override",
            Self::EvaluationReport => "evaluation_report",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        delivery_on_hold,
        DeliveryStatus,
        DeliveryStatus::OnHold,
        "on_hold"
    );
    test_serde_roundtrip!(priority_high, TaskPriority, TaskPriority::High, "high");
    test_serde_roundtrip!(
        task_in_review,
        TaskStatus,
        TaskStatus::InReview,
        "in_review"
    );
    test_serde_roundtrip!(
        assignment_removed,
        AssignmentStatus,
        AssignmentStatus::Removed,
        "removed"
    );
    test_serde_roundtrip!(
        audit_status_changed,
        AuditAction,
        AuditAction::StatusChanged,
        "status_changed"
    );
    test_serde_roundtrip!(
        entity_task_date_override,
        EntityType,
        EntityType::TaskDateOverride,
        "task_date_override"
    );

    // --- Transition tests ---

    #[test]
    fn task_valid_transitions() {
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::InReview));
        assert!(TaskStatus::InReview.can_transition_to(TaskStatus::Completed));
        assert!(TaskStatus::InReview.can_transition_to(TaskStatus::Pending));
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::Cancelled));
        assert!(TaskStatus::InReview.can_transition_to(TaskStatus::Cancelled));
    }

    #[test]
    fn task_invalid_transitions() {
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Completed));
        assert!(!TaskStatus::Completed.can_transition_to(TaskStatus::Pending));
        assert!(!TaskStatus::Completed.can_transition_to(TaskStatus::Cancelled));
        assert!(!TaskStatus::Cancelled.can_transition_to(TaskStatus::InReview));
    }

    #[test]
    fn task_terminal_states() {
        for status in [TaskStatus::Completed, TaskStatus::Cancelled] {
            assert!(status.is_terminal());
            assert!(status.allowed_next_states().is_empty());
        }
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::InReview.is_terminal());
    }

    #[test]
    fn task_progress_per_state() {
        assert_eq!(TaskStatus::Pending.progress(), 0);
        assert_eq!(TaskStatus::InReview.progress(), 50);
        assert_eq!(TaskStatus::Completed.progress(), 100);
        assert_eq!(TaskStatus::Cancelled.progress(), 0);
    }

    #[test]
    fn delivery_transitions() {
        assert!(DeliveryStatus::Planned.can_transition_to(DeliveryStatus::Active));
        assert!(DeliveryStatus::Active.can_transition_to(DeliveryStatus::OnHold));
        assert!(DeliveryStatus::OnHold.can_transition_to(DeliveryStatus::Active));
        assert!(DeliveryStatus::Active.can_transition_to(DeliveryStatus::Completed));
        assert!(!DeliveryStatus::Planned.can_transition_to(DeliveryStatus::Completed));
        assert!(DeliveryStatus::Completed.allowed_next_states().is_empty());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", DeliveryStatus::OnHold), "on_hold");
        assert_eq!(format!("{}", TaskPriority::Low), "low");
        assert_eq!(format!("{}", TaskStatus::InReview), "in_review");
        assert_eq!(format!("{}", AssignmentStatus::Active), "active");
        assert_eq!(format!("{}", AuditAction::Unassigned), "unassigned");
        assert_eq!(format!("{}", EntityType::SubProject), "sub_project");
    }
}
