//! Per-company task schedules.
//!
//! A schedule overrides nothing on the task itself: `Task::due_date` stays as
//! it is, and each assigned company can carry its own start/end dates.

use chrono::{NaiveDate, Utc};
use rd_core::audit_detail::ScheduledDetail;
use rd_core::entities::TaskDateOverride;
use rd_core::enums::{AuditAction, EntityType};
use rd_core::errors::CoreError;

use super::assignment::is_actively_assigned;
use super::audit::{AuditRecord, append_audit};
use super::task::fetch_task;
use crate::error::DatabaseError;
use crate::helpers::{
    format_optional_date, get_opt_string, json_error, parse_datetime, parse_optional_date,
};
use crate::service::RdService;

const SELECT_COLS: &str = "task_id, company_id, start_date, end_date, updated_at";

fn row_to_override(row: &libsql::Row) -> Result<TaskDateOverride, DatabaseError> {
    Ok(TaskDateOverride {
        task_id: row.get(0)?,
        company_id: row.get(1)?,
        start_date: parse_optional_date(get_opt_string(row, 2)?.as_deref())?,
        end_date: parse_optional_date(get_opt_string(row, 3)?.as_deref())?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl RdService {
    /// Set (or clear, with `None`) a company's dates for a task.
    ///
    /// The company must be actively assigned to the task's sub-project. An end
    /// date before the start date is stored as given and only logged.
    pub async fn set_task_dates(
        &self,
        actor: &str,
        task_id: &str,
        company_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<TaskDateOverride, DatabaseError> {
        let now = Utc::now();
        let tx = self.db().begin_write().await?;
        let result: Result<TaskDateOverride, DatabaseError> = async {
            let task = fetch_task(&tx, task_id).await?;
            if !is_actively_assigned(&tx, &task.sub_project_id, company_id).await? {
                return Err(CoreError::UnknownCompany {
                    task_id: task_id.to_string(),
                    company_id: company_id.to_string(),
                }
                .into());
            }

            tx.execute(
                &format!(
                    "INSERT INTO task_date_overrides ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT (task_id, company_id) DO UPDATE SET
                         start_date = excluded.start_date,
                         end_date = excluded.end_date,
                         updated_at = excluded.updated_at"
                ),
                libsql::params![
                    task_id,
                    company_id,
                    format_optional_date(start_date),
                    format_optional_date(end_date),
                    now.to_rfc3339()
                ],
            )
            .await?;

            let detail = ScheduledDetail {
                company_id: company_id.to_string(),
                start_date,
                end_date,
            };
            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::TaskDateOverride,
                    entity_id: &format!("{task_id}/{company_id}"),
                    action: AuditAction::Scheduled,
                    detail: Some(serde_json::to_value(&detail).map_err(json_error)?),
                    at: now,
                },
            )
            .await?;
            Ok(TaskDateOverride {
                task_id: task_id.to_string(),
                company_id: company_id.to_string(),
                start_date,
                end_date,
                updated_at: now,
            })
        }
        .await;
        let schedule = tx.finish(result).await?;

        if schedule.is_inverted() {
            tracing::warn!(
                task_id,
                company_id,
                start = ?schedule.start_date,
                end = ?schedule.end_date,
                "schedule ends before it starts"
            );
        }
        tracing::info!(task_id, company_id, actor, "task dates set");
        Ok(schedule)
    }

    /// All company schedules of a task, by company.
    pub async fn list_task_dates(
        &self,
        task_id: &str,
    ) -> Result<Vec<TaskDateOverride>, DatabaseError> {
        let _read = self.db().read().await;
        let conn = self.db().conn();
        fetch_task(conn, task_id).await?;

        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM task_date_overrides WHERE task_id = ?1
                     ORDER BY company_id"
                ),
                [task_id],
            )
            .await?;
        let mut schedules = Vec::new();
        while let Some(row) = rows.next().await? {
            schedules.push(row_to_override(&row)?);
        }
        Ok(schedules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        ACTOR, seed_company, seed_sub_project, seed_task, test_service,
    };
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[tokio::test]
    async fn inverted_dates_are_accepted() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = seed_task(&svc, &sp.id, "Trade fair prep").await;
        let a = seed_company(&svc, "A").await;
        svc.assign_companies(ACTOR, &sp.id, &[a.id.clone()])
            .await
            .unwrap();

        let schedule = svc
            .set_task_dates(ACTOR, &task.id, &a.id, date(2024, 1, 10), date(2024, 1, 5))
            .await
            .unwrap();
        assert!(schedule.is_inverted());

        let stored = svc.list_task_dates(&task.id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].start_date, date(2024, 1, 10));
        assert_eq!(stored[0].end_date, date(2024, 1, 5));
    }

    #[tokio::test]
    async fn upsert_replaces_and_clears() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = seed_task(&svc, &sp.id, "Labelling").await;
        let a = seed_company(&svc, "A").await;
        svc.assign_companies(ACTOR, &sp.id, &[a.id.clone()])
            .await
            .unwrap();

        svc.set_task_dates(ACTOR, &task.id, &a.id, date(2024, 2, 1), date(2024, 2, 28))
            .await
            .unwrap();
        svc.set_task_dates(ACTOR, &task.id, &a.id, None, date(2024, 3, 15))
            .await
            .unwrap();

        let stored = svc.list_task_dates(&task.id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].start_date, None);
        assert_eq!(stored[0].end_date, date(2024, 3, 15));
        assert_eq!(svc.get_task(&task.id).await.unwrap().due_date, None);
    }

    #[tokio::test]
    async fn unassigned_company_is_rejected() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let task = seed_task(&svc, &sp.id, "Labelling").await;
        let outsider = seed_company(&svc, "Outsider").await;

        let err = svc
            .set_task_dates(ACTOR, &task.id, &outsider.id, date(2024, 1, 1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::UnknownCompany { .. })));

        svc.assign_companies(ACTOR, &sp.id, &[outsider.id.clone()])
            .await
            .unwrap();
        svc.remove_assignment(ACTOR, &sp.id, &outsider.id)
            .await
            .unwrap();
        let removed = svc
            .set_task_dates(ACTOR, &task.id, &outsider.id, date(2024, 1, 1), None)
            .await
            .unwrap_err();
        assert!(matches!(removed, DatabaseError::Core(CoreError::UnknownCompany { .. })));
    }

    #[tokio::test]
    async fn unknown_task_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .set_task_dates(ACTOR, "tsk-missing", "cmp-missing", None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::NotFound {
                entity_type: EntityType::Task,
                ..
            })
        ));
    }
}
