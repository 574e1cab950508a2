//! # rd-db
//!
//! libSQL entity store and workflow service for Readiness.
//!
//! Holds projects, sub-projects, tasks, companies, assignments, per-company
//! task schedules, evaluation reports, and the audit trail. Every workflow
//! operation is a method on [`service::RdService`], split by concern across
//! the `repos` modules.
//!
//! Atomicity: each mutation runs inside one `BEGIN IMMEDIATE` transaction while
//! holding the write side of the store gate. Reads take the read side, so they
//! never observe a half-applied mutation.

pub mod error;
pub mod events;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::{Builder, Connection, Transaction, TransactionBehavior};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Central database handle for all workflow state.
///
/// Wraps a libSQL database, its single connection, and the read/write gate
/// that serializes mutations against it.
pub struct RdDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: Connection,
    gate: RwLock<()>,
}

impl RdDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Must be set per connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let rd_db = Self {
            db,
            conn,
            gate: RwLock::new(()),
        };
        rd_db.run_migrations().await?;
        tracing::debug!(path, "entity store opened");
        Ok(rd_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Take the read side of the gate.
    ///
    /// Held for the duration of a multi-statement read so that no mutation
    /// commits in between.
    pub async fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().await
    }

    /// Take the write side of the gate and open an immediate transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if `BEGIN IMMEDIATE` fails.
    pub async fn begin_write(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let guard = self.gate.write().await;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;
        Ok(WriteTx { tx, _guard: guard })
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"tsk-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        next_id(&self.conn, prefix).await
    }
}

/// Generate a prefixed ID on an explicit connection (usually an open transaction).
pub(crate) async fn next_id(conn: &Connection, prefix: &str) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

/// An open immediate transaction holding the store's write gate.
///
/// Dereferences to the connection so repo helpers can run statements on it.
/// Field order matters: the transaction is dropped before the gate is released.
pub struct WriteTx<'a> {
    tx: Transaction,
    _guard: RwLockWriteGuard<'a, ()>,
}

impl WriteTx<'_> {
    /// Commit on `Ok`, roll back on `Err`, and hand the result back.
    ///
    /// # Errors
    ///
    /// Returns the operation's own error, or the commit failure.
    pub async fn finish<T>(self, result: Result<T, DatabaseError>) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.tx.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = self.tx.rollback().await {
                    tracing::warn!(%rollback_error, "rollback failed after {error}");
                }
                Err(error)
            }
        }
    }
}

impl std::ops::Deref for WriteTx<'_> {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}
