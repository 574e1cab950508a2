//! Fire-and-forget emission of workflow events.
//!
//! The notification layer subscribes to the bus; the service only sends.
//! A send never blocks, and having no subscribers is not an error.

use rd_core::events::WorkflowEvent;
use tokio::sync::broadcast;

/// Default number of buffered events per subscriber before the slowest lags.
pub const DEFAULT_CAPACITY: usize = 256;

/// Broadcast bus for [`WorkflowEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<WorkflowEvent>,
}

impl EventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Emit an event without waiting for any receiver.
    pub fn emit(&self, event: WorkflowEvent) {
        match self.sender.send(event) {
            Ok(receivers) => tracing::trace!(receivers, "workflow event emitted"),
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(?event, "workflow event dropped: no subscribers");
            }
        }
    }

    /// Subscribe to events emitted from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
