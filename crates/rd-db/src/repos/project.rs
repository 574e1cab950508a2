//! Project repository: create, read, status transitions, delete.

use chrono::{NaiveDate, Utc};
use libsql::Connection;
use rd_core::audit_detail::StatusChangedDetail;
use rd_core::entities::Project;
use rd_core::enums::{AuditAction, DeliveryStatus, EntityType};
use rd_core::errors::CoreError;
use rd_core::ids::PREFIX_PROJECT;

use super::audit::{AuditRecord, append_audit};
use super::{optional_text, require_text};
use crate::error::DatabaseError;
use crate::helpers::{
    format_optional_date, get_count, get_opt_string, json_error, parse_datetime, parse_enum,
    parse_optional_date,
};
use crate::next_id;
use crate::service::RdService;

const SELECT_COLS: &str =
    "id, name, description, status, start_date, end_date, consultant_id, created_at, updated_at";

/// Fields for a new project.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub consultant_id: Option<String>,
}

impl NewProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        start_date: parse_optional_date(get_opt_string(row, 4)?.as_deref())?,
        end_date: parse_optional_date(get_opt_string(row, 5)?.as_deref())?,
        consultant_id: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

pub(crate) async fn fetch_project(conn: &Connection, id: &str) -> Result<Project, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => row_to_project(&row),
        None => Err(CoreError::not_found(EntityType::Project, id).into()),
    }
}

impl RdService {
    pub async fn create_project(
        &self,
        actor: &str,
        new: NewProject,
    ) -> Result<Project, DatabaseError> {
        let name = require_text("name", &new.name)?;
        let now = Utc::now();

        let tx = self.db().begin_write().await?;
        let result: Result<Project, DatabaseError> = async {
            let id = next_id(&tx, PREFIX_PROJECT).await?;
            let project = Project {
                id,
                name,
                description: optional_text(new.description.as_deref()),
                status: DeliveryStatus::Planned,
                start_date: new.start_date,
                end_date: new.end_date,
                consultant_id: optional_text(new.consultant_id.as_deref()),
                created_at: now,
                updated_at: now,
            };
            tx.execute(
                &format!(
                    "INSERT INTO projects ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    project.id.as_str(),
                    project.name.as_str(),
                    project.description.as_deref(),
                    project.status.as_str(),
                    format_optional_date(project.start_date),
                    format_optional_date(project.end_date),
                    project.consultant_id.as_deref(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::Project,
                    entity_id: &project.id,
                    action: AuditAction::Created,
                    detail: None,
                    at: now,
                },
            )
            .await?;
            Ok(project)
        }
        .await;
        let project = tx.finish(result).await?;

        tracing::info!(project_id = %project.id, actor, "project created");
        Ok(project)
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let _read = self.db().read().await;
        fetch_project(self.db().conn(), id).await
    }

    /// Most recently created first.
    pub async fn list_projects(&self, limit: u32) -> Result<Vec<Project>, DatabaseError> {
        let _read = self.db().read().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM projects ORDER BY created_at DESC, rowid DESC LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Move a project along the delivery state machine. Same status is a no-op.
    pub async fn transition_project(
        &self,
        actor: &str,
        id: &str,
        new_status: DeliveryStatus,
    ) -> Result<Project, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(Project, bool), DatabaseError> = async {
            let current = fetch_project(&tx, id).await?;
            if current.status == new_status {
                return Ok((current, false));
            }
            if !current.status.can_transition_to(new_status) {
                return Err(CoreError::InvalidTransition {
                    entity_type: EntityType::Project,
                    id: id.to_string(),
                    from: current.status.to_string(),
                    to: new_status.to_string(),
                }
                .into());
            }

            let now = Utc::now();
            tx.execute(
                "UPDATE projects SET status = ?1, updated_at = ?2 WHERE id = ?3",
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
                    entity_type: EntityType::Project,
                    entity_id: id,
                    action: AuditAction::StatusChanged,
                    detail: Some(serde_json::to_value(&detail).map_err(json_error)?),
                    at: now,
                },
            )
            .await?;
            Ok((
                Project {
                    status: new_status,
                    updated_at: now,
                    ..current
                },
                true,
            ))
        }
        .await;
        let (project, changed) = tx.finish(result).await?;

        if changed {
            tracing::info!(project_id = id, status = %new_status, actor, "project transitioned");
        }
        Ok(project)
    }

    /// Delete a project that owns no sub-projects.
    pub async fn delete_project(&self, actor: &str, id: &str) -> Result<(), DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            fetch_project(&tx, id).await?;
            let mut rows = tx
                .query("SELECT COUNT(*) FROM sub_projects WHERE project_id = ?1", [id])
                .await?;
            let count = match rows.next().await? {
                Some(row) => get_count(&row, 0)?,
                None => 0,
            };
            if count > 0 {
                return Err(CoreError::HasDependents {
                    entity_type: EntityType::Project,
                    id: id.to_string(),
                    count,
                }
                .into());
            }

            tx.execute("DELETE FROM projects WHERE id = ?1", [id]).await?;
            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::Project,
                    entity_id: id,
                    action: AuditAction::Deleted,
                    detail: None,
                    at: Utc::now(),
                },
            )
            .await
        }
        .await;
        tx.finish(result).await?;

        tracing::info!(project_id = id, actor, "project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::repos::sub_project::NewSubProject;
    use crate::test_support::helpers::{ACTOR, seed_project, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_project_roundtrip() {
        let svc = test_service().await;
        let project = svc
            .create_project(
                ACTOR,
                NewProject {
                    name: "  Nordic expansion ".into(),
                    description: Some("Phase one".into()),
                    start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
                    consultant_id: Some("usr-consultant".into()),
                    ..NewProject::default()
                },
            )
            .await
            .unwrap();

        assert!(project.id.starts_with("prj-"));
        assert_eq!(project.name, "Nordic expansion");
        assert_eq!(project.status, DeliveryStatus::Planned);

        let fetched = svc.get_project(&project.id).await.unwrap();
        assert_eq!(fetched.start_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(fetched.consultant_id.as_deref(), Some("usr-consultant"));
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let svc = test_service().await;
        let err = svc
            .create_project(ACTOR, NewProject::named("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
        assert!(svc.list_projects(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_project("prj-missing").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn transition_follows_delivery_machine() {
        let svc = test_service().await;
        let project = seed_project(&svc).await;

        let active = svc
            .transition_project(ACTOR, &project.id, DeliveryStatus::Active)
            .await
            .unwrap();
        assert_eq!(active.status, DeliveryStatus::Active);

        let done = svc
            .transition_project(ACTOR, &project.id, DeliveryStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.status, DeliveryStatus::Completed);

        let err = svc
            .transition_project(ACTOR, &project.id, DeliveryStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn same_status_transition_is_silent() {
        let svc = test_service().await;
        let project = seed_project(&svc).await;
        let same = svc
            .transition_project(ACTOR, &project.id, DeliveryStatus::Planned)
            .await
            .unwrap();
        assert_eq!(same, project);

        let entries = svc
            .query_audit(&AuditFilter {
                entity_id: Some(project.id.clone()),
                action: Some(AuditAction::StatusChanged),
                ..AuditFilter::default()
            })
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn delete_blocked_by_sub_projects() {
        let svc = test_service().await;
        let project = seed_project(&svc).await;
        svc.create_sub_project(ACTOR, &project.id, NewSubProject::named("Logistics"))
            .await
            .unwrap();

        let err = svc.delete_project(ACTOR, &project.id).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::HasDependents { count: 1, .. })
        ));
        assert!(svc.get_project(&project.id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_empty_project() {
        let svc = test_service().await;
        let project = seed_project(&svc).await;
        svc.delete_project(ACTOR, &project.id).await.unwrap();
        assert!(svc.get_project(&project.id).await.is_err());

        let entries = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::Project),
                action: Some(AuditAction::Deleted),
                ..AuditFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].actor_id, ACTOR);
    }
}
