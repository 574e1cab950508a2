//! Company assignments and per-company progress.
//!
//! One row per (sub-project, company) pair. Removal flips the row to `removed`
//! and keeps it, so a later assignment reactivates the same row and history
//! such as schedules and reports stays attached.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use libsql::Connection;
use rd_core::audit_detail::AssignmentDetail;
use rd_core::entities::CompanyAssignment;
use rd_core::enums::{AssignmentStatus, AuditAction, EntityType};
use rd_core::errors::CoreError;
use rd_core::progress::TaskCompletion;
use rd_core::responses::CompanyProgressResponse;

use super::audit::{AuditRecord, append_audit};
use super::company::fetch_company;
use super::sub_project::fetch_sub_project;
use crate::error::DatabaseError;
use crate::helpers::{
    get_count, get_opt_string, json_error, parse_datetime, parse_enum, parse_optional_datetime,
};
use crate::service::RdService;

const SELECT_COLS: &str = "sub_project_id, company_id, status, assigned_at, removed_at";

fn row_to_assignment(row: &libsql::Row) -> Result<CompanyAssignment, DatabaseError> {
    Ok(CompanyAssignment {
        sub_project_id: row.get(0)?,
        company_id: row.get(1)?,
        status: parse_enum(&row.get::<String>(2)?)?,
        assigned_at: parse_datetime(&row.get::<String>(3)?)?,
        removed_at: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
    })
}

pub(crate) async fn fetch_assignment(
    conn: &Connection,
    sub_project_id: &str,
    company_id: &str,
) -> Result<Option<CompanyAssignment>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM company_assignments
                 WHERE sub_project_id = ?1 AND company_id = ?2"
            ),
            [sub_project_id, company_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_assignment(&row)?)),
        None => Ok(None),
    }
}

/// Whether the company currently participates in the sub-project.
pub(crate) async fn is_actively_assigned(
    conn: &Connection,
    sub_project_id: &str,
    company_id: &str,
) -> Result<bool, DatabaseError> {
    Ok(fetch_assignment(conn, sub_project_id, company_id)
        .await?
        .is_some_and(|a| a.is_active()))
}

/// Task counts for the sub-project from one aggregate query.
pub(crate) async fn task_completion(
    conn: &Connection,
    sub_project_id: &str,
) -> Result<TaskCompletion, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*), SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END)
             FROM tasks WHERE sub_project_id = ?1",
            [sub_project_id],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(TaskCompletion {
        total: get_count(&row, 0)?,
        completed: get_count(&row, 1)?,
    })
}

/// Insert a new assignment or reactivate a removed one.
async fn activate(
    conn: &Connection,
    sub_project_id: &str,
    company_id: &str,
    reactivate: bool,
    now: DateTime<Utc>,
) -> Result<CompanyAssignment, DatabaseError> {
    if reactivate {
        conn.execute(
            "UPDATE company_assignments
             SET status = ?1, assigned_at = ?2, removed_at = NULL
             WHERE sub_project_id = ?3 AND company_id = ?4",
            libsql::params![
                AssignmentStatus::Active.as_str(),
                now.to_rfc3339(),
                sub_project_id,
                company_id
            ],
        )
        .await?;
    } else {
        conn.execute(
            &format!("INSERT INTO company_assignments ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, NULL)"),
            libsql::params![
                sub_project_id,
                company_id,
                AssignmentStatus::Active.as_str(),
                now.to_rfc3339()
            ],
        )
        .await?;
    }
    Ok(CompanyAssignment {
        sub_project_id: sub_project_id.to_string(),
        company_id: company_id.to_string(),
        status: AssignmentStatus::Active,
        assigned_at: now,
        removed_at: None,
    })
}

fn pair_key(sub_project_id: &str, company_id: &str) -> String {
    format!("{sub_project_id}/{company_id}")
}

impl RdService {
    /// Assign a set of companies to a sub-project.
    ///
    /// Returns only the assignments this call created or reactivated. Companies
    /// that are already active are skipped with a warning. Any unknown company
    /// aborts the whole batch.
    pub async fn assign_companies(
        &self,
        actor: &str,
        sub_project_id: &str,
        company_ids: &[String],
    ) -> Result<Vec<CompanyAssignment>, DatabaseError> {
        let mut seen = HashSet::new();
        let selection: Vec<&str> = company_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty() && seen.insert(*id))
            .collect();
        if selection.is_empty() {
            return Err(CoreError::EmptySelection.into());
        }

        let now = Utc::now();
        let tx = self.db().begin_write().await?;
        let result: Result<Vec<CompanyAssignment>, DatabaseError> = async {
            fetch_sub_project(&tx, sub_project_id).await?;
            for company_id in &selection {
                fetch_company(&tx, company_id).await?;
            }

            let mut created = Vec::new();
            for company_id in selection.iter().copied() {
                let existing = fetch_assignment(&tx, sub_project_id, company_id).await?;
                let reactivated = match existing {
                    Some(ref a) if a.is_active() => {
                        let skipped = CoreError::AlreadyAssigned {
                            sub_project_id: sub_project_id.to_string(),
                            company_id: company_id.to_string(),
                        };
                        tracing::warn!(%skipped, "skipping active assignment");
                        continue;
                    }
                    Some(_) => true,
                    None => false,
                };

                let assignment = activate(&tx, sub_project_id, company_id, reactivated, now).await?;
                let detail = AssignmentDetail {
                    sub_project_id: sub_project_id.to_string(),
                    company_id: company_id.to_string(),
                    reactivated,
                };
                append_audit(
                    &tx,
                    AuditRecord {
                        actor_id: actor,
                        entity_type: EntityType::Assignment,
                        entity_id: &pair_key(sub_project_id, company_id),
                        action: AuditAction::Assigned,
                        detail: Some(serde_json::to_value(&detail).map_err(json_error)?),
                        at: now,
                    },
                )
                .await?;
                created.push(assignment);
            }
            Ok(created)
        }
        .await;
        let created = tx.finish(result).await?;

        tracing::info!(sub_project_id, assigned = created.len(), actor, "companies assigned");
        Ok(created)
    }

    /// Mark an active assignment removed. Schedules and reports are kept.
    pub async fn remove_assignment(
        &self,
        actor: &str,
        sub_project_id: &str,
        company_id: &str,
    ) -> Result<CompanyAssignment, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<CompanyAssignment, DatabaseError> = async {
            let current = fetch_assignment(&tx, sub_project_id, company_id)
                .await?
                .filter(CompanyAssignment::is_active)
                .ok_or_else(|| CoreError::NotAssigned {
                    sub_project_id: sub_project_id.to_string(),
                    company_id: company_id.to_string(),
                })?;

            let now = Utc::now();
            tx.execute(
                "UPDATE company_assignments SET status = ?1, removed_at = ?2
                 WHERE sub_project_id = ?3 AND company_id = ?4",
                libsql::params![
                    AssignmentStatus::Removed.as_str(),
                    now.to_rfc3339(),
                    sub_project_id,
                    company_id
                ],
            )
            .await?;
            let detail = AssignmentDetail {
                sub_project_id: sub_project_id.to_string(),
                company_id: company_id.to_string(),
                reactivated: false,
            };
            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::Assignment,
                    entity_id: &pair_key(sub_project_id, company_id),
                    action: AuditAction::Unassigned,
                    detail: Some(serde_json::to_value(&detail).map_err(json_error)?),
                    at: now,
                },
            )
            .await?;
            Ok(CompanyAssignment {
                status: AssignmentStatus::Removed,
                removed_at: Some(now),
                ..current
            })
        }
        .await;
        let removed = tx.finish(result).await?;

        tracing::info!(sub_project_id, company_id, actor, "assignment removed");
        Ok(removed)
    }

    pub async fn list_assignments(
        &self,
        sub_project_id: &str,
        include_removed: bool,
    ) -> Result<Vec<CompanyAssignment>, DatabaseError> {
        let _read = self.db().read().await;
        let conn = self.db().conn();
        fetch_sub_project(conn, sub_project_id).await?;

        let filter = if include_removed {
            ""
        } else {
            " AND status = 'active'"
        };
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM company_assignments
                     WHERE sub_project_id = ?1{filter}
                     ORDER BY assigned_at, company_id"
                ),
                [sub_project_id],
            )
            .await?;
        let mut assignments = Vec::new();
        while let Some(row) = rows.next().await? {
            assignments.push(row_to_assignment(&row)?);
        }
        Ok(assignments)
    }

    /// Completed share of the sub-project's tasks, as seen by one company.
    ///
    /// Tasks are shared by every company in the sub-project, so the figure is
    /// the same for all of them.
    pub async fn company_progress(
        &self,
        sub_project_id: &str,
        company_id: &str,
    ) -> Result<CompanyProgressResponse, DatabaseError> {
        let _read = self.db().read().await;
        let conn = self.db().conn();
        fetch_sub_project(conn, sub_project_id).await?;
        fetch_company(conn, company_id).await?;
        let completion = task_completion(conn, sub_project_id).await?;

        tracing::debug!(sub_project_id, company_id, ?completion, "company progress");
        Ok(CompanyProgressResponse {
            sub_project_id: sub_project_id.to_string(),
            company_id: company_id.to_string(),
            percentage: completion.percentage(),
            completion,
        })
    }
}
