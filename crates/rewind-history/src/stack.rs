//! Append-only snapshot stack.

use tracing::{debug, trace};

/// Last-in first-out store of snapshots.
///
/// Restoring pops the newest snapshot, so there is no redo. Use
/// [`HistoryManager`](crate::HistoryManager) when stepping forward again
/// matters.
#[derive(Debug, Clone)]
pub struct SnapshotStack<S> {
    snapshots: Vec<S>,
}

impl<S> SnapshotStack<S> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Push a snapshot on top of the stack.
    pub fn push(&mut self, snapshot: S) {
        self.snapshots.push(snapshot);
        debug!(len = self.snapshots.len(), "Pushed snapshot");
    }

    /// Remove and return the newest snapshot.
    pub fn pop(&mut self) -> Option<S> {
        let snapshot = self.snapshots.pop();
        if snapshot.is_none() {
            trace!("Nothing to pop");
        }
        snapshot
    }

    /// The newest snapshot, without removing it.
    pub fn peek(&self) -> Option<&S> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl<S> Default for SnapshotStack<S> {
    fn default() -> Self {
        Self::new()
    }
}
