//! Sub-project repository: the unit of delivery that owns tasks, assignments,
//! and reports. Progress is derived from its tasks and kept current here.

use chrono::{DateTime, NaiveDate, Utc};
use libsql::Connection;
use rd_core::audit_detail::StatusChangedDetail;
use rd_core::entities::SubProject;
use rd_core::enums::{AuditAction, DeliveryStatus, EntityType};
use rd_core::errors::CoreError;
use rd_core::ids::PREFIX_SUB_PROJECT;
use rd_core::progress::mean_progress;

use super::audit::{AuditRecord, append_audit};
use super::project::fetch_project;
use super::{optional_text, require_text};
use crate::error::DatabaseError;
use crate::helpers::{
    format_optional_date, get_opt_string, get_percentage, json_error, parse_datetime, parse_enum,
    parse_optional_date,
};
use crate::next_id;
use crate::service::RdService;

const SELECT_COLS: &str = "id, project_id, name, description, status, progress, \
     start_date, end_date, created_at, updated_at";

/// Fields for a new sub-project.
#[derive(Debug, Clone, Default)]
pub struct NewSubProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl NewSubProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn row_to_sub_project(row: &libsql::Row) -> Result<SubProject, DatabaseError> {
    Ok(SubProject {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        description: get_opt_string(row, 3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        progress: get_percentage(row, 5)?,
        start_date: parse_optional_date(get_opt_string(row, 6)?.as_deref())?,
        end_date: parse_optional_date(get_opt_string(row, 7)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

pub(crate) async fn fetch_sub_project(
    conn: &Connection,
    id: &str,
) -> Result<SubProject, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM sub_projects WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => row_to_sub_project(&row),
        None => Err(CoreError::not_found(EntityType::SubProject, id).into()),
    }
}

/// Recompute and store the sub-project's progress from its tasks.
pub(crate) async fn refresh_progress(
    conn: &Connection,
    sub_project_id: &str,
    now: DateTime<Utc>,
) -> Result<u8, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT progress FROM tasks WHERE sub_project_id = ?1",
            [sub_project_id],
        )
        .await?;
    let mut values = Vec::new();
    while let Some(row) = rows.next().await? {
        values.push(get_percentage(&row, 0)?);
    }
    let progress = mean_progress(values);

    conn.execute(
        "UPDATE sub_projects SET progress = ?1, updated_at = ?2 WHERE id = ?3",
        libsql::params![i64::from(progress), now.to_rfc3339(), sub_project_id],
    )
    .await?;
    tracing::debug!(sub_project_id, progress, "sub-project progress refreshed");
    Ok(progress)
}

impl RdService {
    pub async fn create_sub_project(
        &self,
        actor: &str,
        project_id: &str,
        new: NewSubProject,
    ) -> Result<SubProject, DatabaseError> {
        let name = require_text("name", &new.name)?;
        let now = Utc::now();

        let tx = self.db().begin_write().await?;
        let result: Result<SubProject, DatabaseError> = async {
            fetch_project(&tx, project_id).await?;
            let sub_project = SubProject {
                id: next_id(&tx, PREFIX_SUB_PROJECT).await?,
                project_id: project_id.to_string(),
                name,
                description: optional_text(new.description.as_deref()),
                status: DeliveryStatus::Planned,
                progress: 0,
                start_date: new.start_date,
                end_date: new.end_date,
                created_at: now,
                updated_at: now,
            };
            tx.execute(
                &format!(
                    "INSERT INTO sub_projects ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                ),
                libsql::params![
                    sub_project.id.as_str(),
                    project_id,
                    sub_project.name.as_str(),
                    sub_project.description.as_deref(),
                    sub_project.status.as_str(),
                    i64::from(sub_project.progress),
                    format_optional_date(sub_project.start_date),
                    format_optional_date(sub_project.end_date),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::SubProject,
                    entity_id: &sub_project.id,
                    action: AuditAction::Created,
                    detail: None,
                    at: now,
                },
            )
            .await?;
            Ok(sub_project)
        }
        .await;
        let sub_project = tx.finish(result).await?;

        tracing::info!(sub_project_id = %sub_project.id, project_id, actor, "sub-project created");
        Ok(sub_project)
    }

    pub async fn get_sub_project(&self, id: &str) -> Result<SubProject, DatabaseError> {
        let _read = self.db().read().await;
        fetch_sub_project(self.db().conn(), id).await
    }

    /// Sub-projects of a project in creation order.
    pub async fn list_sub_projects(
        &self,
        project_id: &str,
    ) -> Result<Vec<SubProject>, DatabaseError> {
        let _read = self.db().read().await;
        let conn = self.db().conn();
        fetch_project(conn, project_id).await?;

        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM sub_projects WHERE project_id = ?1
                     ORDER BY created_at, rowid"
                ),
                [project_id],
            )
            .await?;
        let mut sub_projects = Vec::new();
        while let Some(row) = rows.next().await? {
            sub_projects.push(row_to_sub_project(&row)?);
        }
        Ok(sub_projects)
    }

    /// Same state machine as projects. Same status is a no-op.
    pub async fn transition_sub_project(
        &self,
        actor: &str,
        id: &str,
        new_status: DeliveryStatus,
    ) -> Result<SubProject, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<Option<SubProject>, DatabaseError> = async {
            let current = fetch_sub_project(&tx, id).await?;
            if current.status == new_status {
                return Ok(None);
            }
            if !current.status.can_transition_to(new_status) {
                return Err(CoreError::InvalidTransition {
                    entity_type: EntityType::SubProject,
                    id: id.to_string(),
                    from: current.status.to_string(),
                    to: new_status.to_string(),
                }
                .into());
            }

            let now = Utc::now();
            tx.execute(
                "UPDATE sub_projects SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![new_status.as_str(), now.to_rfc3339(), id],
            )
            .await?;
            let detail = StatusChangedDetail {
                from: current.status.as_str().to_string(),
                to: new_status.as_str().to_string(),
            };
            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::SubProject,
                    entity_id: id,
                    action: AuditAction::StatusChanged,
                    detail: Some(serde_json::to_value(&detail).map_err(json_error)?),
                    at: now,
                },
            )
            .await?;
            Ok(Some(SubProject {
                status: new_status,
                updated_at: now,
                ..current
            }))
        }
        .await;

        match tx.finish(result).await? {
            Some(updated) => {
                tracing::info!(sub_project_id = id, status = %new_status, actor, "sub-project transitioned");
                Ok(updated)
            }
            None => self.get_sub_project(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        ACTOR, complete_task, seed_project, seed_sub_project, seed_task, test_service,
    };
    use pretty_assertions::assert_eq;
    use rd_core::enums::TaskStatus;

    #[tokio::test]
    async fn create_under_project() {
        let svc = test_service().await;
        let project = seed_project(&svc).await;
        let sp = svc
            .create_sub_project(
                ACTOR,
                &project.id,
                NewSubProject {
                    name: "Certification".into(),
                    end_date: NaiveDate::from_ymd_opt(2024, 6, 30),
                    ..NewSubProject::default()
                },
            )
            .await
            .unwrap();

        assert!(sp.id.starts_with("spj-"));
        assert_eq!(sp.progress, 0);
        assert_eq!(sp.status, DeliveryStatus::Planned);

        let listed = svc.list_sub_projects(&project.id).await.unwrap();
        assert_eq!(listed, vec![sp]);
    }

    #[tokio::test]
    async fn unknown_project_is_rejected() {
        let svc = test_service().await;
        let err = svc
            .create_sub_project(ACTOR, "prj-missing", NewSubProject::named("Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::NotFound {
                entity_type: EntityType::Project,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn on_hold_round_trip() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let held = svc
            .transition_sub_project(ACTOR, &sp.id, DeliveryStatus::OnHold)
            .await
            .unwrap();
        assert_eq!(held.status, DeliveryStatus::OnHold);

        let err = svc
            .transition_sub_project(ACTOR, &sp.id, DeliveryStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidTransition { .. })
        ));

        let resumed = svc
            .transition_sub_project(ACTOR, &sp.id, DeliveryStatus::Active)
            .await
            .unwrap();
        assert_eq!(resumed.status, DeliveryStatus::Active);
    }

    #[tokio::test]
    async fn progress_tracks_task_mean() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        let a = seed_task(&svc, &sp.id, "Export plan").await;
        let b = seed_task(&svc, &sp.id, "Pricing").await;
        assert_eq!(svc.get_sub_project(&sp.id).await.unwrap().progress, 0);

        svc.transition_task(ACTOR, &a.id, TaskStatus::InReview)
            .await
            .unwrap();
        assert_eq!(svc.get_sub_project(&sp.id).await.unwrap().progress, 25);

        complete_task(&svc, &b.id).await;
        assert_eq!(svc.get_sub_project(&sp.id).await.unwrap().progress, 75);

        seed_task(&svc, &sp.id, "Late addition").await;
        assert_eq!(svc.get_sub_project(&sp.id).await.unwrap().progress, 50);
    }
}
