//! Task repository: creation, edits, and the task lifecycle.
//!
//! Every write that can change a task's progress also refreshes the owning
//! sub-project's progress inside the same transaction.

use chrono::{NaiveDate, Utc};
use libsql::Connection;
use rd_core::audit_detail::StatusChangedDetail;
use rd_core::entities::Task;
use rd_core::enums::{AuditAction, EntityType, TaskPriority, TaskStatus};
use rd_core::errors::CoreError;
use rd_core::events::WorkflowEvent;
use rd_core::ids::PREFIX_TASK;

use super::audit::{AuditRecord, append_audit};
use super::sub_project::{fetch_sub_project, refresh_progress};
use super::{optional_text, require_text};
use crate::error::DatabaseError;
use crate::helpers::{
    format_optional_date, get_opt_string, get_percentage, json_error, parse_datetime, parse_enum,
    parse_optional_date,
};
use crate::next_id;
use crate::service::RdService;
use crate::updates::task::TaskUpdate;

const SELECT_COLS: &str = "id, sub_project_id, title, description, priority, status, due_date, \
     progress, created_at, updated_at";

/// Fields for a new task. Status and progress always start at `Pending`/0.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        sub_project_id: row.get(1)?,
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        priority: parse_enum(&row.get::<String>(4)?)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        due_date: parse_optional_date(get_opt_string(row, 6)?.as_deref())?,
        progress: get_percentage(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

pub(crate) async fn fetch_task(conn: &Connection, id: &str) -> Result<Task, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => row_to_task(&row),
        None => Err(CoreError::not_found(EntityType::Task, id).into()),
    }
}

impl RdService {
    pub async fn create_task(
        &self,
        actor: &str,
        sub_project_id: &str,
        new: NewTask,
    ) -> Result<Task, DatabaseError> {
        let title = require_text("title", &new.title)?;
        let now = Utc::now();

        let tx = self.db().begin_write().await?;
        let result: Result<Task, DatabaseError> = async {
            fetch_sub_project(&tx, sub_project_id).await?;
            let status = TaskStatus::Pending;
            let task = Task {
                id: next_id(&tx, PREFIX_TASK).await?,
                sub_project_id: sub_project_id.to_string(),
                title,
                description: optional_text(new.description.as_deref()),
                priority: new.priority,
                status,
                due_date: new.due_date,
                progress: status.progress(),
                created_at: now,
                updated_at: now,
            };
            tx.execute(
                &format!(
                    "INSERT INTO tasks ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                ),
                libsql::params![
                    task.id.as_str(),
                    sub_project_id,
                    task.title.as_str(),
                    task.description.as_deref(),
                    task.priority.as_str(),
                    task.status.as_str(),
                    format_optional_date(task.due_date),
                    i64::from(task.progress),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            refresh_progress(&tx, sub_project_id, now).await?;
            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::Task,
                    entity_id: &task.id,
                    action: AuditAction::Created,
                    detail: None,
                    at: now,
                },
            )
            .await?;
            Ok(task)
        }
        .await;
        let task = tx.finish(result).await?;

        tracing::info!(task_id = %task.id, sub_project_id, actor, "task created");
        Ok(task)
    }

    pub async fn get_task(&self, id: &str) -> Result<Task, DatabaseError> {
        let _read = self.db().read().await;
        fetch_task(self.db().conn(), id).await
    }

    /// Tasks of a sub-project in creation order.
    pub async fn list_tasks(&self, sub_project_id: &str) -> Result<Vec<Task>, DatabaseError> {
        let _read = self.db().read().await;
        let conn = self.db().conn();
        fetch_sub_project(conn, sub_project_id).await?;

        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tasks WHERE sub_project_id = ?1
                     ORDER BY created_at, rowid"
                ),
                [sub_project_id],
            )
            .await?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }

    /// Edit descriptive fields. Allowed in every status, terminal ones included.
    pub async fn update_task(
        &self,
        actor: &str,
        task_id: &str,
        mut update: TaskUpdate,
    ) -> Result<Task, DatabaseError> {
        if let Some(ref title) = update.title {
            update.title = Some(require_text("title", title)?);
        }
        if let Some(Some(ref description)) = update.description {
            update.description = Some(optional_text(Some(description)));
        }
        if update.is_empty() {
            return self.get_task(task_id).await;
        }

        let tx = self.db().begin_write().await?;
        let result: Result<Task, DatabaseError> = async {
            fetch_task(&tx, task_id).await?;

            let mut sets = Vec::new();
            let mut params: Vec<libsql::Value> = Vec::new();
            if let Some(ref title) = update.title {
                params.push(title.clone().into());
                sets.push(format!("title = ?{}", params.len()));
            }
            if let Some(ref description) = update.description {
                params.push(description.clone().map_or(libsql::Value::Null, Into::into));
                sets.push(format!("description = ?{}", params.len()));
            }
            if let Some(priority) = update.priority {
                params.push(priority.as_str().into());
                sets.push(format!("priority = ?{}", params.len()));
            }
            if let Some(due_date) = update.due_date {
                params.push(
                    format_optional_date(due_date).map_or(libsql::Value::Null, Into::into),
                );
                sets.push(format!("due_date = ?{}", params.len()));
            }

            let now = Utc::now();
            params.push(now.to_rfc3339().into());
            sets.push(format!("updated_at = ?{}", params.len()));
            params.push(task_id.into());
            let sql = format!(
                "UPDATE tasks SET {} WHERE id = ?{}",
                sets.join(", "),
                params.len()
            );
            tx.execute(&sql, libsql::params_from_iter(params)).await?;

            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::Task,
                    entity_id: task_id,
                    action: AuditAction::Updated,
                    detail: Some(serde_json::to_value(&update).map_err(json_error)?),
                    at: now,
                },
            )
            .await?;
            fetch_task(&tx, task_id).await
        }
        .await;
        let task = tx.finish(result).await?;

        tracing::info!(task_id, actor, "task updated");
        Ok(task)
    }

    /// Move a task through its lifecycle.
    ///
    /// Re-submitting the current status returns the task unchanged and records
    /// nothing. Leaving `Completed` or `Cancelled` is rejected. On success the
    /// task's progress follows its status and the sub-project's progress is
    /// recomputed; a `TaskTransitioned` event is emitted after commit.
    pub async fn transition_task(
        &self,
        actor: &str,
        task_id: &str,
        new_status: TaskStatus,
    ) -> Result<Task, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(Task, Option<TaskStatus>), DatabaseError> = async {
            let current = fetch_task(&tx, task_id).await?;
            if current.status == new_status {
                return Ok((current, None));
            }
            if !current.status.can_transition_to(new_status) {
                return Err(CoreError::InvalidTransition {
                    entity_type: EntityType::Task,
                    id: task_id.to_string(),
                    from: current.status.to_string(),
                    to: new_status.to_string(),
                }
                .into());
            }

            let now = Utc::now();
            let progress = new_status.progress();
            tx.execute(
                "UPDATE tasks SET status = ?1, progress = ?2, updated_at = ?3 WHERE id = ?4",
                libsql::params![
                    new_status.as_str(),
                    i64::from(progress),
                    now.to_rfc3339(),
                    task_id
                ],
            )
            .await?;
            refresh_progress(&tx, &current.sub_project_id, now).await?;

            let detail = StatusChangedDetail {
                from: current.status.as_str().to_string(),
                to: new_status.as_str().to_string(),
            };
            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::Task,
                    entity_id: task_id,
                    action: AuditAction::StatusChanged,
                    detail: Some(serde_json::to_value(&detail).map_err(json_error)?),
                    at: now,
                },
            )
            .await?;

            let from = current.status;
            Ok((
                Task {
                    status: new_status,
                    progress,
                    updated_at: now,
                    ..current
                },
                Some(from),
            ))
        }
        .await;
        let (task, previous) = tx.finish(result).await?;

        let Some(from) = previous else {
            tracing::debug!(task_id, status = %new_status, "task already in requested status");
            return Ok(task);
        };
        tracing::info!(task_id, %from, to = %new_status, actor, "task transitioned");
        self.emit(WorkflowEvent::TaskTransitioned {
            task_id: task.id.clone(),
            sub_project_id: task.sub_project_id.clone(),
            from,
            to: new_status,
            actor_id: actor.to_string(),
            at: task.updated_at,
        });
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::helpers::{
        ACTOR, complete_task, seed_sub_project, seed_task, test_service,
    };
    use crate::updates::task::TaskUpdateBuilder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[tokio::test]
    async fn create_task_starts_pending() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = svc
            .create_task(
                ACTOR,
                &sp.id,
                NewTask {
                    title: " Export pricing review ".into(),
                    priority: TaskPriority::High,
                    due_date: NaiveDate::from_ymd_opt(2024, 3, 31),
                    ..NewTask::default()
                },
            )
            .await
            .unwrap();

        assert!(task.id.starts_with("tsk-"));
        assert_eq!(task.title, "Export pricing review");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.progress, 0);
        assert_eq!(svc.get_task(&task.id).await.unwrap(), task);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    #[tokio::test]
    async fn blank_title_is_rejected(#[case] title: &str) {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let err = svc
            .create_task(ACTOR, &sp.id, NewTask::titled(title))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
        assert!(svc.list_tasks(&sp.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_sub_project_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .create_task(ACTOR, "spj-missing", NewTask::titled("Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::NotFound {
                entity_type: EntityType::SubProject,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn review_cycle_sets_progress() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = seed_task(&svc, &sp.id, "Customs paperwork").await;

        let review = svc
            .transition_task(ACTOR, &task.id, TaskStatus::InReview)
            .await
            .unwrap();
        assert_eq!(review.progress, 50);

        let back = svc
            .transition_task(ACTOR, &task.id, TaskStatus::Pending)
            .await
            .unwrap();
        assert_eq!(back.progress, 0);

        let done = complete_task(&svc, &task.id).await;
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.progress, 100);
    }

    #[rstest]
    #[case(TaskStatus::Pending, TaskStatus::Completed)]
    #[case(TaskStatus::Completed, TaskStatus::Pending)]
    #[case(TaskStatus::Completed, TaskStatus::Cancelled)]
    #[case(TaskStatus::Cancelled, TaskStatus::Pending)]
    #[tokio::test]
    async fn forbidden_transitions(#[case] from: TaskStatus, #[case] to: TaskStatus) {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = seed_task(&svc, &sp.id, "Guarded").await;
        match from {
            TaskStatus::Pending => {}
            TaskStatus::Completed => {
                complete_task(&svc, &task.id).await;
            }
            other => {
                svc.transition_task(ACTOR, &task.id, other).await.unwrap();
            }
        }

        let err = svc.transition_task(ACTOR, &task.id, to).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidTransition { .. })
        ));
        assert_eq!(svc.get_task(&task.id).await.unwrap().status, from);
    }

    #[tokio::test]
    async fn cancel_from_any_open_status() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let pending = seed_task(&svc, &sp.id, "Pending one").await;
        let reviewing = seed_task(&svc, &sp.id, "Reviewing one").await;
        svc.transition_task(ACTOR, &reviewing.id, TaskStatus::InReview)
            .await
            .unwrap();

        for id in [&pending.id, &reviewing.id] {
            let cancelled = svc
                .transition_task(ACTOR, id, TaskStatus::Cancelled)
                .await
                .unwrap();
            assert_eq!(cancelled.progress, 0);
        }
    }

    #[tokio::test]
    async fn resubmitting_completed_is_a_no_op() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = seed_task(&svc, &sp.id, "Done twice").await;
        let done = complete_task(&svc, &task.id).await;

        let mut events = svc.subscribe();
        let again = svc
            .transition_task(ACTOR, &task.id, TaskStatus::Completed)
            .await
            .unwrap();
        assert_eq!(again, done);
        assert!(events.try_recv().is_err(), "no event for a no-op");

        let changes = svc
            .query_audit(&AuditFilter {
                entity_id: Some(task.id.clone()),
                action: Some(AuditAction::StatusChanged),
                ..AuditFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(changes.len(), 2);
    }

    #[tokio::test]
    async fn transition_emits_event() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = seed_task(&svc, &sp.id, "Notify").await;
        let mut events = svc.subscribe();

        svc.transition_task("usr-reviewer", &task.id, TaskStatus::InReview)
            .await
            .unwrap();

        match events.try_recv().unwrap() {
            WorkflowEvent::TaskTransitioned {
                task_id,
                from,
                to,
                actor_id,
                ..
            } => {
                assert_eq!(task_id, task.id);
                assert_eq!(from, TaskStatus::Pending);
                assert_eq!(to, TaskStatus::InReview);
                assert_eq!(actor_id, "usr-reviewer");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_allowed_on_terminal_task() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = seed_task(&svc, &sp.id, "Original").await;
        complete_task(&svc, &task.id).await;

        let update = TaskUpdateBuilder::new()
            .title("Renamed")
            .priority(TaskPriority::Low)
            .due_date(NaiveDate::from_ymd_opt(2024, 5, 1))
            .build();
        let updated = svc.update_task(ACTOR, &task.id, update).await.unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.priority, TaskPriority::Low);
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));

        let cleared = svc
            .update_task(ACTOR, &task.id, TaskUpdateBuilder::new().due_date(None).build())
            .await
            .unwrap();
        assert_eq!(cleared.due_date, None);
    }

    #[tokio::test]
    async fn update_rejects_blank_title() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = seed_task(&svc, &sp.id, "Keep me").await;
        let err = svc
            .update_task(ACTOR, &task.id, TaskUpdateBuilder::new().title(" ").build())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
        assert_eq!(svc.get_task(&task.id).await.unwrap().title, "Keep me");
    }
}
