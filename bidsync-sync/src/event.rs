//! Synchronizer notifications.

use bidsync_core::Resource;
use serde_json::Value;

/// Handle returned by `subscribe`; passing it back removes exactly that
/// listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Emitted by the synchronizer after each state-changing operation.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// The resource list was (re)loaded.
    Loaded { resources: Vec<Resource> },
    /// A create/update completed; `result` is the raw server envelope.
    Saved { id: Option<String>, result: Value },
    /// A delete completed; `result` is the raw server envelope.
    Deleted { id: String, result: Value },
    /// The current selection changed. `resource` is the full record when it
    /// can be resolved from the in-memory list.
    SelectionChanged {
        id: Option<String>,
        resource: Option<Resource>,
    },
}

impl SyncEvent {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            SyncEvent::Loaded { .. } => "loaded",
            SyncEvent::Saved { .. } => "saved",
            SyncEvent::Deleted { .. } => "deleted",
            SyncEvent::SelectionChanged { .. } => "selection_changed",
        }
    }
}
