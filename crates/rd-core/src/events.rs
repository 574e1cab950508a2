//! Workflow events handed to the notification boundary.
//!
//! The service emits these after a successful commit. Delivery and display
//! belong to whoever subscribes; emission never waits on them.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// A task moved to a new status.
    TaskTransitioned {
        task_id: String,
        sub_project_id: String,
        from: TaskStatus,
        to: TaskStatus,
        actor_id: String,
        at: DateTime<Utc>,
    },
    /// An evaluation report was stored.
    ReportCreated {
        report_id: String,
        sub_project_id: String,
        company_id: String,
        actor_id: String,
        at: DateTime<Utc>,
    },
}

impl WorkflowEvent {
    #[must_use]
    pub fn sub_project_id(&self) -> &str {
        match self {
            Self::TaskTransitioned { sub_project_id, .. }
            | Self::ReportCreated { sub_project_id, .. } => sub_project_id,
        }
    }
}
