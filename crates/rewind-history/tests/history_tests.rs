//! History integration tests.
//!
//! Drives `HistoryManager` through a subject and through generated operation
//! sequences, checking cursor and branch behaviour after every step.

use proptest::prelude::*;
use rewind_history::{HistoryManager, Originator, SnapshotStack};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Debug, Default)]
struct Cursor {
    x: i32,
    y: i32,
}

impl Originator for Cursor {
    type Snapshot = Position;

    fn snapshot(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }

    fn restore(&mut self, snapshot: &Position) {
        self.x = snapshot.x;
        self.y = snapshot.y;
    }
}

/// Test that a subject is restored through undo and redo.
#[test]
fn test_subject_round_trip() {
    let mut cursor = Cursor::default();
    let mut history = HistoryManager::new();
    history.checkpoint(&cursor);

    cursor.x = 4;
    history.checkpoint(&cursor);

    cursor.y = 7;
    history.checkpoint(&cursor);

    assert!(history.undo_into(&mut cursor));
    assert_eq!((cursor.x, cursor.y), (4, 0));

    assert!(history.undo_into(&mut cursor));
    assert_eq!((cursor.x, cursor.y), (0, 0));
    assert!(!history.undo_into(&mut cursor));

    assert!(history.redo_into(&mut cursor));
    assert!(history.redo_into(&mut cursor));
    assert_eq!((cursor.x, cursor.y), (4, 7));
    assert!(!history.redo_into(&mut cursor));
}

/// Test that a checkpoint taken after undo makes the old future unreachable.
#[test]
fn test_checkpoint_after_undo_drops_future() {
    let mut cursor = Cursor::default();
    let mut history = HistoryManager::new();
    history.checkpoint(&cursor);
    cursor.x = 1;
    history.checkpoint(&cursor);
    cursor.x = 2;
    history.checkpoint(&cursor);

    history.undo_into(&mut cursor);
    history.undo_into(&mut cursor);
    cursor.y = 9;
    history.checkpoint(&cursor);

    let saved: Vec<_> = history.entries().map(|e| e.snapshot().clone()).collect();
    assert_eq!(
        saved,
        vec![Position { x: 0, y: 0 }, Position { x: 0, y: 9 }]
    );
    assert!(!history.redo_into(&mut cursor));
    assert_eq!((cursor.x, cursor.y), (0, 9));
}

/// Returned snapshots are copies; changing them does not touch the history.
#[test]
fn test_returned_snapshots_are_independent() {
    let mut history = HistoryManager::new();
    history.save(vec![1, 2]);
    history.save(vec![1, 2, 3]);

    let mut previous = history.undo().expect("undo should succeed");
    previous.push(99);

    assert_eq!(history.current(), Some(&vec![1, 2]));
    assert_eq!(history.redo(), Some(vec![1, 2, 3]));
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Save(u32),
    Undo,
    Redo,
}

/// Reference model with an explicit -1 sentinel.
struct Model {
    buffer: Vec<u32>,
    cursor: isize,
}

impl Model {
    fn apply(&mut self, op: Op) -> Option<u32> {
        match op {
            Op::Save(value) => {
                self.buffer.truncate((self.cursor + 1) as usize);
                self.buffer.push(value);
                self.cursor = self.buffer.len() as isize - 1;
                None
            }
            Op::Undo if self.cursor > 0 => {
                self.cursor -= 1;
                Some(self.buffer[self.cursor as usize])
            }
            Op::Redo if self.cursor < self.buffer.len() as isize - 1 => {
                self.cursor += 1;
                Some(self.buffer[self.cursor as usize])
            }
            _ => None,
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => any::<u32>().prop_map(Op::Save),
        2 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

fn cursor_as_isize(history: &HistoryManager<u32>) -> isize {
    history.cursor().map(|c| c as isize).unwrap_or(-1)
}

proptest! {
    /// The history agrees with the reference model on every step.
    #[test]
    fn history_matches_reference_model(ops in prop::collection::vec(op_strategy(), 0..500)) {
        let mut history = HistoryManager::new();
        let mut model = Model {
            buffer: Vec::new(),
            cursor: -1,
        };

        for op in ops {
            let expected = model.apply(op);
            let actual = match op {
                Op::Save(value) => {
                    history.save(value);
                    prop_assert_eq!(history.cursor(), Some(history.len() - 1));
                    None
                }
                Op::Undo => history.undo(),
                Op::Redo => history.redo(),
            };

            prop_assert_eq!(actual, expected, "op {:?}", op);
            prop_assert_eq!(history.len(), model.buffer.len());
            prop_assert_eq!(cursor_as_isize(&history), model.cursor);
            let saved: Vec<u32> = history.entries().map(|e| *e.snapshot()).collect();
            prop_assert_eq!(saved, model.buffer.clone());
        }
    }

    /// Redo right after a successful undo returns the snapshot undo left.
    #[test]
    fn undo_then_redo_returns_to_same_snapshot(
        ops in prop::collection::vec(op_strategy(), 1..200)
    ) {
        let mut history = HistoryManager::new();
        for op in ops {
            match op {
                Op::Save(value) => history.save(value),
                Op::Undo => {
                    history.undo();
                }
                Op::Redo => {
                    history.redo();
                }
            }
        }

        let before = history.current().copied();
        if history.undo().is_some() {
            prop_assert_eq!(history.redo(), before);
        } else {
            prop_assert_eq!(history.current().copied(), before);
            prop_assert!(cursor_as_isize(&history) <= 0);
        }
    }
}

/// Test the restore-only stack used for checkpoints.
#[test]
fn test_stack_restores_in_reverse() {
    let mut stack = SnapshotStack::new();
    let mut cursor = Cursor::default();

    stack.push(cursor.snapshot());
    cursor.x = 3;
    stack.push(cursor.snapshot());
    cursor.x = 8;

    let latest = stack.pop().expect("stack has snapshots");
    cursor.restore(&latest);
    assert_eq!(cursor.x, 3);

    let first = stack.pop().expect("stack has snapshots");
    cursor.restore(&first);
    assert_eq!(cursor.x, 0);
    assert!(stack.pop().is_none());
}
