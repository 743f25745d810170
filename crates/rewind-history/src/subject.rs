//! The subject side of a history.

/// A value that can capture its own state as a snapshot and later be
/// restored from one.
///
/// A history never mutates its subject directly; it hands snapshots back and
/// the subject applies them through [`restore`](Originator::restore).
pub trait Originator {
    /// Immutable record of this subject's state.
    type Snapshot: Clone;

    /// Capture the current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replace the current state with the one in `snapshot`.
    fn restore(&mut self, snapshot: &Self::Snapshot);
}
