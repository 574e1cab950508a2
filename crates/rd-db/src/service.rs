//! Service layer orchestrating workflow operations against the store.
//!
//! `RdService` wraps `RdDb` (raw database access) and the `EventBus`
//! (notification boundary). All workflow operations are implemented as
//! `impl RdService` blocks in the `repos` modules.

use rd_core::events::WorkflowEvent;
use tokio::sync::broadcast;

use crate::RdDb;
use crate::error::DatabaseError;
use crate::events::EventBus;

/// Orchestrates workflow mutations with audit trail and event emission.
///
/// Every mutation method follows this protocol:
/// 1. Validate input (no store access)
/// 2. Take the write gate and begin an immediate transaction
/// 3. Check preconditions and execute SQL
/// 4. Append the audit entry (inside the transaction)
/// 5. Commit, then emit the workflow event if the operation has one
pub struct RdService {
    db: RdDb,
    events: EventBus,
}

impl RdService {
    /// Create a service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = RdDb::open_local(db_path).await?;
        Ok(Self::from_db(db, EventBus::default()))
    }

    /// Create from an existing `RdDb` and event bus.
    #[must_use]
    pub const fn from_db(db: RdDb, events: EventBus) -> Self {
        Self { db, events }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RdDb {
        &self.db
    }

    /// Subscribe to workflow events emitted after successful commits.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: WorkflowEvent) {
        self.events.emit(event);
    }
}
