//! Company repository. Companies are registered once and referenced by
//! assignments, schedules, and reports.

use chrono::Utc;
use libsql::Connection;
use rd_core::entities::Company;
use rd_core::enums::{AuditAction, EntityType};
use rd_core::errors::CoreError;
use rd_core::ids::PREFIX_COMPANY;

use super::audit::{AuditRecord, append_audit};
use super::{optional_text, require_text};
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::next_id;
use crate::service::RdService;

const SELECT_COLS: &str = "id, name, contact_name, contact_email, contact_phone, created_at";

#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl NewCompany {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn row_to_company(row: &libsql::Row) -> Result<Company, DatabaseError> {
    Ok(Company {
        id: row.get(0)?,
        name: row.get(1)?,
        contact_name: get_opt_string(row, 2)?,
        contact_email: get_opt_string(row, 3)?,
        contact_phone: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

pub(crate) async fn fetch_company(conn: &Connection, id: &str) -> Result<Company, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM companies WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => row_to_company(&row),
        None => Err(CoreError::not_found(EntityType::Company, id).into()),
    }
}

impl RdService {
    pub async fn register_company(
        &self,
        actor: &str,
        new: NewCompany,
    ) -> Result<Company, DatabaseError> {
        let name = require_text("name", &new.name)?;
        let now = Utc::now();

        let tx = self.db().begin_write().await?;
        let result: Result<Company, DatabaseError> = async {
            let company = Company {
                id: next_id(&tx, PREFIX_COMPANY).await?,
                name,
                contact_name: optional_text(new.contact_name.as_deref()),
                contact_email: optional_text(new.contact_email.as_deref()),
                contact_phone: optional_text(new.contact_phone.as_deref()),
                created_at: now,
            };
            tx.execute(
                &format!("INSERT INTO companies ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                libsql::params![
                    company.id.as_str(),
                    company.name.as_str(),
                    company.contact_name.as_deref(),
                    company.contact_email.as_deref(),
                    company.contact_phone.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::Company,
                    entity_id: &company.id,
                    action: AuditAction::Created,
                    detail: None,
                    at: now,
                },
            )
            .await?;
            Ok(company)
        }
        .await;
        let company = tx.finish(result).await?;

        tracing::info!(company_id = %company.id, actor, "company registered");
        Ok(company)
    }

    pub async fn get_company(&self, id: &str) -> Result<Company, DatabaseError> {
        let _read = self.db().read().await;
        fetch_company(self.db().conn(), id).await
    }

    /// Alphabetical by name.
    pub async fn list_companies(&self, limit: u32) -> Result<Vec<Company>, DatabaseError> {
        let _read = self.db().read().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM companies ORDER BY name, id LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next().await? {
            companies.push(row_to_company(&row)?);
        }
        Ok(companies)
    }
}
