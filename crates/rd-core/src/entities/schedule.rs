use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Company-specific schedule for a shared task. Independent of `Task::due_date`.
///
/// No ordering is enforced between `start_date` and `end_date`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskDateOverride {
    pub task_id: String,
    pub company_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

impl TaskDateOverride {
    /// Whether the override ends before it starts.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(start), Some(end)) if end < start)
    }
}
