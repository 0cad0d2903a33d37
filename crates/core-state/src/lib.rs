//! Editor state: open documents, the shared kill ring, the repeat argument,
//! and the transient status line.
//!
//! Everything here is synchronous and terminal-free. Key decoding and mode
//! handling live in `core-actions`, which drives these types one key at a time.
//!
//! Each [`Document`] owns its rows, cursor, mark, viewport and undo history.
//! The [`KillRing`] and [`RepeatArgument`] are editor-wide and are handed to
//! document operations explicitly so that a single kill chain can span any
//! sequence of deletes on the current document.

use std::time::{Duration, Instant};

pub mod buffers;
pub mod completion;
pub mod document;
pub mod error;
pub mod killring;
pub mod motion;
pub mod region;
pub mod search;
pub mod uarg;
pub mod undo;

pub use buffers::BufferSet;
pub use completion::{Completion, format_candidates, longest_common_prefix};
pub use document::{Document, NO_NAME, Viewport};
pub use error::EditError;
pub use killring::{KillMode, KillRing};
pub use motion::Direction;
pub use region::{REFLOW_MARGIN, reflow_lines};
pub use search::{Search, SearchDirection, find};
pub use uarg::{MAX_REPEAT, RepeatArgument};
pub use undo::{Snapshot, UNDO_HISTORY_MAX, UndoKind, UndoNode, UndoTree};

/// Rows reserved below the text area for the status and message lines.
pub const STATUS_ROWS: usize = 2;

/// Tunables the host can override from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub reflow_margin: usize,
    pub undo_limit: usize,
    pub status_timeout: Duration,
    pub completion_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reflow_margin: REFLOW_MARGIN,
            undo_limit: UNDO_HISTORY_MAX,
            status_timeout: Duration::from_secs(3),
            completion_width: 80,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

/// Top-level editor state container.
#[derive(Debug)]
pub struct EditorState {
    pub buffers: BufferSet,
    pub kill_ring: KillRing,
    pub repeat: RepeatArgument,
    pub status: Option<StatusMessage>,
    pub screen_rows: usize,
    pub screen_cols: usize,
    pub settings: Settings,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl EditorState {
    pub fn new(settings: Settings) -> Self {
        let mut buffers = BufferSet::new();
        buffers.current_mut().undo.set_limit(settings.undo_limit);
        Self {
            buffers,
            kill_ring: KillRing::new(),
            repeat: RepeatArgument::default(),
            status: None,
            screen_rows: 24,
            screen_cols: 80,
            settings,
        }
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = Some(StatusMessage {
            text: msg.into(),
            set_at: Instant::now(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// The status text while it is younger than the configured timeout.
    pub fn status_text(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| m.set_at.elapsed() < self.settings.status_timeout)
            .map(|m| m.text.as_str())
    }

    /// Drop an expired status message; returns true if one was cleared.
    pub fn tick_status(&mut self) -> bool {
        if let Some(m) = &self.status
            && m.set_at.elapsed() >= self.settings.status_timeout
        {
            self.status = None;
            return true;
        }
        false
    }

    /// Record the terminal size in cells.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.screen_cols = cols;
        self.screen_rows = rows;
    }

    /// Rows available for document text.
    pub fn text_rows(&self) -> usize {
        self.screen_rows.saturating_sub(STATUS_ROWS).max(1)
    }

    pub fn current_doc(&self) -> &Document {
        self.buffers.current()
    }

    pub fn current_doc_mut(&mut self) -> &mut Document {
        self.buffers.current_mut()
    }

    /// Split borrow of the current document and the kill ring.
    pub fn doc_and_kill(&mut self) -> (&mut Document, &mut KillRing) {
        (self.buffers.current_mut(), &mut self.kill_ring)
    }

    /// Add a document configured with the current settings and return its index.
    pub fn add_document(&mut self, mut doc: Document) -> usize {
        doc.undo.set_limit(self.settings.undo_limit);
        self.buffers.add(doc)
    }

    /// Whether any open document has unsaved changes.
    pub fn any_dirty(&self) -> bool {
        self.buffers.iter().any(|d| d.dirty)
    }
}
