//! Progress aggregation and the report gate.
//!
//! These are pure functions over task counts so the store can compute them
//! from a single aggregate query and tests can exercise them without a database.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;

/// Task completion counts for one sub-project.
///
/// Completion is tracked sub-project wide: every assigned company shares the
/// same task list, so a company's progress is the sub-project's progress.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskCompletion {
    pub total: u32,
    pub completed: u32,
}

impl TaskCompletion {
    /// Tally a list of task statuses.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = TaskStatus>,
    {
        statuses.into_iter().fold(Self::default(), |mut acc, status| {
            acc.total += 1;
            if status == TaskStatus::Completed {
                acc.completed += 1;
            }
            acc
        })
    }

    /// Completed share of all tasks, rounded down. Zero when there are no tasks.
    #[must_use]
    pub fn percentage(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = u64::from(self.completed) * 100 / u64::from(self.total);
        u8::try_from(pct.min(100)).unwrap_or(100)
    }

    /// The report gate: at least one task, and every task completed.
    ///
    /// Cancelled tasks count as not completed and keep the gate closed.
    #[must_use]
    pub const fn is_report_eligible(self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Rounded mean of task progress values, 0 for an empty sub-project.
pub fn mean_progress<I>(values: I) -> u8
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), v| (sum + u64::from(v), count + 1));
    if count == 0 {
        return 0;
    }
    let mean = (sum + count / 2) / count;
    u8::try_from(mean.min(100)).unwrap_or(100)
}
