//! Audit trail repository.
//!
//! Append-only entries recording every mutation, written inside the
//! mutation's transaction.

use chrono::{DateTime, Utc};
use libsql::Connection;
use rd_core::entities::AuditEntry;
use rd_core::enums::{AuditAction, EntityType};
use rd_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::service::RdService;

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub actor_id: Option<String>,
    pub limit: Option<u32>,
}

/// What happened, to which entity, by whom.
pub(crate) struct AuditRecord<'a> {
    pub actor_id: &'a str,
    pub entity_type: EntityType,
    pub entity_id: &'a str,
    pub action: AuditAction,
    pub detail: Option<serde_json::Value>,
    pub at: DateTime<Utc>,
}

/// Append an audit entry on the given connection (normally an open transaction).
pub(crate) async fn append_audit(
    conn: &Connection,
    record: AuditRecord<'_>,
) -> Result<(), DatabaseError> {
    let detail = record.detail.as_ref().map(ToString::to_string);
    conn.execute(
        "INSERT INTO audit_trail (id, actor_id, entity_type, entity_id, action, detail, created_at)
         VALUES (?1 || '-' || lower(hex(randomblob(4))), ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            PREFIX_AUDIT,
            record.actor_id,
            record.entity_type.as_str(),
            record.entity_id,
            record.action.as_str(),
            detail.as_deref(),
            record.at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

fn row_to_entry(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    let detail = match get_opt_string(row, 5)? {
        Some(raw) => Some(
            serde_json::from_str(&raw)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in audit detail: {e}")))?,
        ),
        None => None,
    };
    Ok(AuditEntry {
        id: row.get(0)?,
        actor_id: row.get(1)?,
        entity_type: parse_enum(&row.get::<String>(2)?)?,
        entity_id: row.get(3)?,
        action: parse_enum(&row.get::<String>(4)?)?,
        detail,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl RdService {
    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(et) = filter.entity_type {
            params.push(et.as_str().into());
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(eid.clone().into());
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(action.as_str().into());
            conditions.push(format!("action = ?{}", params.len()));
        }
        if let Some(ref actor) = filter.actor_id {
            params.push(actor.clone().into());
            conditions.push(format!("actor_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT id, actor_id, entity_type, entity_id, action, detail, created_at
             FROM audit_trail {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        let _read = self.db().read().await;
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{ACTOR, seed_company, seed_sub_project, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn mutations_leave_audit_entries() {
        let svc = test_service().await;
        let sp = seed_sub_project(&svc).await;
        seed_company(&svc, "A").await;

        let all = svc.query_audit(&AuditFilter::default()).await.unwrap();
        let kinds: Vec<EntityType> = all.iter().map(|e| e.entity_type).collect();
        assert_eq!(
            kinds,
            vec![EntityType::Company, EntityType::SubProject, EntityType::Project]
        );
        assert!(all.iter().all(|e| e.actor_id == ACTOR));
        assert!(all.iter().all(|e| e.id.starts_with("aud-")));

        let for_sub_project = svc
            .query_audit(&AuditFilter {
                entity_id: Some(sp.id.clone()),
                ..AuditFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(for_sub_project.len(), 1);
        assert_eq!(for_sub_project[0].action, AuditAction::Created);
    }

    #[tokio::test]
    async fn filter_by_actor_and_limit() {
        let svc = test_service().await;
        svc.register_company("usr-other", crate::repos::company::NewCompany::named("B"))
            .await
            .unwrap();
        seed_company(&svc, "C").await;
        seed_company(&svc, "D").await;

        let mine = svc
            .query_audit(&AuditFilter {
                actor_id: Some(ACTOR.into()),
                limit: Some(1),
                ..AuditFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].actor_id, ACTOR);
    }
}
