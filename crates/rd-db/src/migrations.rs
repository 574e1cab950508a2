//! Schema setup.
//!
//! The SQL is embedded at compile time. `PRAGMA user_version` records the
//! applied version so reopening an existing file skips work already done.

use crate::RdDb;
use crate::error::DatabaseError;

const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

/// Version written to `user_version` once every migration has run.
pub(crate) const SCHEMA_VERSION: i64 = 1;

impl RdDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        let current = self.schema_version().await?;
        if current >= SCHEMA_VERSION {
            tracing::debug!(current, "schema up to date");
            return Ok(());
        }

        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        self.conn
            .execute(&format!("PRAGMA user_version = {SCHEMA_VERSION}"), ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("user_version: {e}")))?;

        tracing::info!(from = current, to = SCHEMA_VERSION, "schema migrated");
        Ok(())
    }

    pub(crate) async fn schema_version(&self) -> Result<i64, DatabaseError> {
        let mut rows = self.conn.query("PRAGMA user_version", ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
