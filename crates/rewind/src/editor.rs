//! Text editor subject with full undo/redo.

use rewind_history::{HistoryConfig, HistoryManager, HistoryResult, Originator};
use std::fmt;
use tracing::debug;

/// Immutable state of the editor at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    content: String,
    cursor_position: usize,
    unsaved_changes: bool,
}

/// Fields to replace when deriving a new [`EditorSnapshot`].
///
/// `None` keeps the source value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorPatch {
    pub content: Option<String>,
    pub cursor_position: Option<usize>,
    pub unsaved_changes: Option<bool>,
}

impl EditorSnapshot {
    pub fn new(content: impl Into<String>, cursor_position: usize, unsaved_changes: bool) -> Self {
        Self {
            content: content.into(),
            cursor_position,
            unsaved_changes,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Derive a new snapshot with the fields in `patch` replaced.
    pub fn copy_with(&self, patch: EditorPatch) -> Self {
        Self {
            content: patch.content.unwrap_or_else(|| self.content.clone()),
            cursor_position: patch.cursor_position.unwrap_or(self.cursor_position),
            unsaved_changes: patch.unsaved_changes.unwrap_or(self.unsaved_changes),
        }
    }
}

impl fmt::Display for EditorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  content:         {:?}", self.content())?;
        writeln!(f, "  cursor:          {}", self.cursor_position())?;
        write!(f, "  unsaved changes: {}", self.unsaved_changes())
    }
}

/// The editor being tracked. Every edit swaps in a derived snapshot.
#[derive(Debug, Clone)]
pub struct EditorState {
    state: EditorSnapshot,
}

impl EditorState {
    pub fn new(state: EditorSnapshot) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &EditorSnapshot {
        &self.state
    }

    /// Insert text at the cursor and move the cursor past it.
    pub fn insert(&mut self, text: &str) {
        let at = byte_offset(&self.state.content, self.state.cursor_position);
        let mut content = self.state.content.clone();
        content.insert_str(at, text);

        self.state = self.state.copy_with(EditorPatch {
            content: Some(content),
            cursor_position: Some(self.state.cursor_position + text.chars().count()),
            unsaved_changes: Some(true),
        });
    }

    /// Replace the whole buffer, leaving the cursor at the end.
    pub fn replace(&mut self, text: &str) {
        self.state = self.state.copy_with(EditorPatch {
            content: Some(text.to_string()),
            cursor_position: Some(text.chars().count()),
            unsaved_changes: Some(true),
        });
    }

    /// Move the cursor, clamped to the end of the content.
    pub fn move_cursor(&mut self, position: usize) {
        let position = position.min(self.state.content.chars().count());
        self.state = self.state.copy_with(EditorPatch {
            cursor_position: Some(position),
            ..Default::default()
        });
    }

    /// Mark the buffer as written out.
    pub fn commit(&mut self) {
        self.state = self.state.copy_with(EditorPatch {
            unsaved_changes: Some(false),
            ..Default::default()
        });
    }

    /// Swap in a snapshot derived with `patch`, taking its fields as given.
    pub fn apply_patch(&mut self, patch: EditorPatch) {
        self.state = self.state.copy_with(patch);
    }
}

impl Originator for EditorState {
    type Snapshot = EditorSnapshot;

    fn snapshot(&self) -> EditorSnapshot {
        self.state.clone()
    }

    fn restore(&mut self, snapshot: &EditorSnapshot) {
        self.state = snapshot.clone();
    }
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

/// A single editor operation.
///
/// Every variant except `Patch` can be parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOp {
    Insert(String),
    Replace(String),
    Cursor(usize),
    Commit,
    Patch(EditorPatch),
    Undo,
    Redo,
}

/// What applying an [`EditorOp`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Saved,
    Undone,
    Redone,
    NothingToUndo,
    NothingToRedo,
}

/// An editor and its history.
pub struct EditorSession {
    editor: EditorState,
    history: HistoryManager<EditorSnapshot>,
}

impl EditorSession {
    /// Start a session, saving the initial state as the first snapshot.
    pub fn new(initial: EditorSnapshot, config: &HistoryConfig) -> HistoryResult<Self> {
        let editor = EditorState::new(initial);
        let mut history = HistoryManager::with_config(config)?;
        history.checkpoint(&editor);
        Ok(Self { editor, history })
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn history(&self) -> &HistoryManager<EditorSnapshot> {
        &self.history
    }

    /// Apply one operation. Edits are saved to the history.
    pub fn apply(&mut self, op: &EditorOp) -> EditorOutcome {
        debug!(?op, "Applying editor op");
        match op {
            EditorOp::Undo => {
                return if self.history.undo_into(&mut self.editor) {
                    EditorOutcome::Undone
                } else {
                    EditorOutcome::NothingToUndo
                };
            }
            EditorOp::Redo => {
                return if self.history.redo_into(&mut self.editor) {
                    EditorOutcome::Redone
                } else {
                    EditorOutcome::NothingToRedo
                };
            }
            EditorOp::Insert(text) => self.editor.insert(text),
            EditorOp::Replace(text) => self.editor.replace(text),
            EditorOp::Cursor(position) => self.editor.move_cursor(*position),
            EditorOp::Commit => self.editor.commit(),
            EditorOp::Patch(patch) => self.editor.apply_patch(patch.clone()),
        }

        self.history.checkpoint(&self.editor);
        EditorOutcome::Saved
    }
}

/// Initial state and operations used when none are given.
pub fn default_script() -> (EditorSnapshot, Vec<EditorOp>) {
    (
        EditorSnapshot::new("console.log('Hello world')", 2, false),
        vec![
            EditorOp::Patch(EditorPatch {
                content: Some("console.log('Hello world')\nconsole.log('New line')".to_string()),
                cursor_position: Some(3),
                unsaved_changes: Some(true),
            }),
            EditorOp::Patch(EditorPatch {
                cursor_position: Some(5),
                ..Default::default()
            }),
            EditorOp::Undo,
            EditorOp::Redo,
        ],
    )
}
