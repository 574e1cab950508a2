//! Database error types for rd-db.

use rd_core::errors::{CoreError, ErrorCategory};
use thiserror::Error;

/// Errors from store operations.
///
/// Workflow rule violations arrive as `Core`; everything else is a storage fault.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A workflow rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A SQL query failed or a row could not be parsed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => core.category(),
            _ => ErrorCategory::Storage,
        }
    }

    /// Stable machine-readable code for API responses.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Core(core) => core.code(),
            _ => "STORAGE_ERROR",
        }
    }

    /// The wrapped workflow error, if this is one.
    #[must_use]
    pub const fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(core) => Some(core),
            _ => None,
        }
    }
}

/// Whether a libSQL error is a UNIQUE or PRIMARY KEY constraint violation.
///
/// Matched on the message, as SQLite reports the extended code only in text
/// through the libSQL error type.
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE constraint failed") || msg.contains("PRIMARY KEY constraint failed")
}
