//! Cursor-addressed snapshot history.

use crate::config::HistoryConfig;
use crate::error::HistoryResult;
use crate::subject::Originator;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use tracing::{debug, trace};

/// A saved snapshot together with when it was saved.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<S> {
    snapshot: S,
    saved_at: DateTime<Utc>,
}

impl<S> HistoryEntry<S> {
    fn new(snapshot: S) -> Self {
        Self {
            snapshot,
            saved_at: Utc::now(),
        }
    }

    /// The stored snapshot.
    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    /// When the snapshot was saved.
    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }
}

/// Linear undo/redo history of immutable snapshots.
///
/// Snapshots are kept in save order with a cursor marking the active one.
/// `undo` and `redo` only move the cursor. Saving while the cursor is behind
/// the tip discards every snapshot ahead of it before appending, so the
/// abandoned redo branch can never be reached again.
///
/// The history is empty (no cursor) until the first [`save`](Self::save).
///
/// # Example
///
/// ```
/// use rewind_history::HistoryManager;
///
/// let mut history = HistoryManager::new();
/// history.save("a");
/// history.save("b");
/// history.save("c");
///
/// assert_eq!(history.undo(), Some("b"));
/// assert_eq!(history.undo(), Some("a"));
///
/// history.save("d");
/// assert_eq!(history.redo(), None);
/// assert_eq!(history.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct HistoryManager<S> {
    entries: VecDeque<HistoryEntry<S>>,
    /// `None` iff `entries` is empty.
    cursor: Option<usize>,
    max_entries: Option<NonZeroUsize>,
}

impl<S: Clone> HistoryManager<S> {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            max_entries: None,
        }
    }

    /// Create an empty history that keeps at most `max_entries` snapshots.
    ///
    /// When a save would exceed the limit the oldest snapshots are evicted.
    pub fn with_max_entries(max_entries: NonZeroUsize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Self::new()
        }
    }

    /// Create an empty history sized by `config`.
    pub fn with_config(config: &HistoryConfig) -> HistoryResult<Self> {
        config.validate()?;
        Ok(Self {
            max_entries: config.max_entries.and_then(NonZeroUsize::new),
            ..Self::new()
        })
    }

    /// Save a snapshot as the new tip.
    ///
    /// Any snapshots ahead of the cursor are dropped first.
    pub fn save(&mut self, snapshot: S) {
        if let Some(cursor) = self.cursor {
            let discarded = self.entries.len() - (cursor + 1);
            if discarded > 0 {
                self.entries.truncate(cursor + 1);
                debug!(discarded, "Discarded redo branch");
            }
        }

        self.entries.push_back(HistoryEntry::new(snapshot));

        if let Some(max) = self.max_entries {
            let excess = self.entries.len().saturating_sub(max.get());
            if excess > 0 {
                self.entries.drain(..excess);
                debug!(evicted = excess, "Evicted oldest snapshots");
            }
        }

        self.cursor = self.entries.len().checked_sub(1);
        debug!(cursor = ?self.cursor, len = self.entries.len(), "Saved snapshot");
    }

    /// Step back one snapshot and return it.
    ///
    /// Returns `None` without changing anything when the cursor is at the
    /// oldest snapshot or the history is empty.
    pub fn undo(&mut self) -> Option<S> {
        self.step_back().cloned()
    }

    /// Step forward one snapshot and return it.
    ///
    /// Returns `None` without changing anything when the cursor is at the
    /// tip or the history is empty.
    pub fn redo(&mut self) -> Option<S> {
        self.step_forward().cloned()
    }

    /// Record the current state of `subject`.
    pub fn checkpoint<O>(&mut self, subject: &O)
    where
        O: Originator<Snapshot = S>,
    {
        self.save(subject.snapshot());
    }

    /// Undo and restore `subject` from the resulting snapshot.
    ///
    /// Returns `false` if there was nothing to undo.
    pub fn undo_into<O>(&mut self, subject: &mut O) -> bool
    where
        O: Originator<Snapshot = S>,
    {
        match self.step_back() {
            Some(snapshot) => {
                subject.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Redo and restore `subject` from the resulting snapshot.
    ///
    /// Returns `false` if there was nothing to redo.
    pub fn redo_into<O>(&mut self, subject: &mut O) -> bool
    where
        O: Originator<Snapshot = S>,
    {
        match self.step_forward() {
            Some(snapshot) => {
                subject.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn step_back(&mut self) -> Option<&S> {
        let cursor = match self.cursor {
            Some(cursor) if cursor > 0 => cursor - 1,
            _ => {
                trace!(cursor = ?self.cursor, "Nothing to undo");
                return None;
            }
        };

        self.cursor = Some(cursor);
        debug!(cursor, len = self.entries.len(), "Undo");
        self.entries.get(cursor).map(HistoryEntry::snapshot)
    }

    fn step_forward(&mut self) -> Option<&S> {
        let cursor = match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => cursor + 1,
            _ => {
                trace!(cursor = ?self.cursor, "Nothing to redo");
                return None;
            }
        };

        self.cursor = Some(cursor);
        debug!(cursor, len = self.entries.len(), "Redo");
        self.entries.get(cursor).map(HistoryEntry::snapshot)
    }
}

impl<S> HistoryManager<S> {
    /// Index of the active snapshot, `None` when nothing was saved.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of stored snapshots, including the redo branch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retention limit, if any.
    pub fn max_entries(&self) -> Option<NonZeroUsize> {
        self.max_entries
    }

    /// The active snapshot.
    pub fn current(&self) -> Option<&S> {
        self.cursor
            .and_then(|cursor| self.entries.get(cursor))
            .map(HistoryEntry::snapshot)
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    /// All stored entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry<S>> + '_ {
        self.entries.iter()
    }

    /// Drop every snapshot and return to the empty state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        debug!("Cleared history");
    }
}

impl<S: Clone> Default for HistoryManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
