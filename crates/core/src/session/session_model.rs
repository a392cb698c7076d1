use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::commitments::CommitmentDraft;
use crate::routing::{Notice, Screen};

/// Change pushed to whoever renders the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionUpdate {
    CommitmentChanged(CommitmentDraft),
    Navigate(Screen),
    Notice(Notice),
}

/// Contract-event listener owned by the session.
///
/// The listening task stops when this handle is dropped.
#[derive(Debug)]
pub struct EventSubscription {
    handle: JoinHandle<()>,
}

impl EventSubscription {
    pub(crate) fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
