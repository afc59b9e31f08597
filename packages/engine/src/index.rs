//! Id index: job id to store node.

use std::collections::HashMap;

use queue_core::JobId;

use crate::store::NodeHandle;

/// Maps each live job id to its node in the [`JobStore`](crate::store::JobStore).
///
/// The index has no lock of its own; it is only reachable through the
/// queue's structural lock, together with the store it describes.
#[derive(Debug, Default)]
pub struct JobIndex {
    entries: HashMap<JobId, NodeHandle>,
}

impl JobIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a node. Returns the handle previously stored for `id`.
    pub fn put(&mut self, id: JobId, handle: NodeHandle) -> Option<NodeHandle> {
        self.entries.insert(id, handle)
    }

    pub fn get(&self, id: JobId) -> Option<NodeHandle> {
        self.entries.get(&id).copied()
    }

    pub fn remove(&mut self, id: JobId) -> Option<NodeHandle> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
