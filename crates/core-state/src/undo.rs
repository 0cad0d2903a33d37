use core_text::Position;
use tracing::trace;

/// Default cap on committed nodes retained per document.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Node classification controlling how a node is reverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndoKind {
    /// `text` was inserted at (row, col). Newline bytes are row breaks.
    Insert,
    /// `text` was removed starting at (row, col).
    Delete,
    /// Structural edit captured as a whole-document snapshot.
    Unknown,
}

/// Row contents plus cursor, captured before a structural edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub rows: Vec<Vec<u8>>,
    pub cursor: Position,
}

#[derive(Clone, Debug)]
pub struct UndoNode {
    pub kind: UndoKind,
    pub row: usize,
    pub col: usize,
    pub text: Vec<u8>,
    /// Cursor before the first edit folded into this node.
    pub cursor: Position,
    /// Present only for `Unknown` nodes. Reverting swaps it with the live
    /// document, so after an undo it holds the state needed to redo.
    pub snapshot: Option<Snapshot>,
}

impl UndoNode {
    pub fn start(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Position just past `text` when laid out from (row, col).
    pub fn end(&self) -> Position {
        text_end(self.start(), &self.text)
    }
}

/// Where a run of bytes ends when laid out from `start`.
pub fn text_end(start: Position, text: &[u8]) -> Position {
    match text.iter().rposition(|&b| b == b'\n') {
        None => Position::new(start.row, start.col + text.len()),
        Some(last) => {
            let breaks = text.iter().filter(|&&b| b == b'\n').count();
            Position::new(start.row + breaks, text.len() - last - 1)
        }
    }
}

/// Per-document edit history.
///
/// Committed nodes form a single chain: `done` holds the nodes up to and
/// including the current one, `undone` holds the nodes after it (most recent
/// undo on top). Committing a new node discards `undone`, so no redo branch
/// survives a fresh edit. Consecutive character edits accumulate in `pending`
/// until something that cannot extend it arrives.
#[derive(Debug)]
pub struct UndoTree {
    done: Vec<UndoNode>,
    undone: Vec<UndoNode>,
    pending: Option<UndoNode>,
    limit: usize,
}

impl Default for UndoTree {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoTree {
    pub fn new() -> Self {
        Self::with_limit(UNDO_HISTORY_MAX)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            done: Vec::new(),
            undone: Vec::new(),
            pending: None,
            limit: limit.max(1),
        }
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.trim();
    }

    pub fn undo_depth(&self) -> usize {
        self.done.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.undone.len()
    }

    pub fn pending(&self) -> Option<&UndoNode> {
        self.pending.as_ref()
    }

    /// The node the chain currently ends at.
    pub fn current(&self) -> Option<&UndoNode> {
        self.done.last()
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
        self.pending = None;
        trace!(target: "state.undo", "clear");
    }

    /// Record `text` inserted at `at`. Extends the pending insert when `at`
    /// is exactly where it ends.
    pub fn record_insert(&mut self, at: Position, cursor: Position, text: &[u8]) {
        if let Some(p) = self.pending.as_mut()
            && p.kind == UndoKind::Insert
            && p.end() == at
        {
            p.text.extend_from_slice(text);
            return;
        }
        self.begin(UndoKind::Insert, at, cursor, text);
    }

    /// Record `text` removed starting at `at`. A removal at the pending
    /// delete's start extends it forward; one ending at that start extends it
    /// backward.
    pub fn record_delete(&mut self, at: Position, cursor: Position, text: &[u8]) {
        if let Some(p) = self.pending.as_mut()
            && p.kind == UndoKind::Delete
        {
            if p.start() == at {
                p.text.extend_from_slice(text);
                return;
            }
            if text_end(at, text) == p.start() {
                p.text.splice(0..0, text.iter().copied());
                p.row = at.row;
                p.col = at.col;
                return;
            }
        }
        self.begin(UndoKind::Delete, at, cursor, text);
    }

    /// Record a structural edit about to happen, as a committed snapshot node.
    pub fn record_snapshot(&mut self, snapshot: Snapshot) {
        self.commit();
        let cursor = snapshot.cursor;
        self.pending = Some(UndoNode {
            kind: UndoKind::Unknown,
            row: cursor.row,
            col: cursor.col,
            text: Vec::new(),
            cursor,
            snapshot: Some(snapshot),
        });
        self.commit();
    }

    fn begin(&mut self, kind: UndoKind, at: Position, cursor: Position, text: &[u8]) {
        self.commit();
        self.pending = Some(UndoNode {
            kind,
            row: at.row,
            col: at.col,
            text: text.to_vec(),
            cursor,
            snapshot: None,
        });
    }

    /// Append the pending node after the current one, discarding any redo side.
    pub fn commit(&mut self) {
        let Some(node) = self.pending.take() else {
            return;
        };
        self.done.push(node);
        if !self.undone.is_empty() {
            self.undone.clear();
            trace!(target: "state.undo", "redo_cleared_on_new_edit");
        }
        self.trim();
        trace!(target: "state.undo", undo_depth = self.done.len(), "commit");
    }

    fn trim(&mut self) {
        if self.done.len() > self.limit {
            let excess = self.done.len() - self.limit;
            self.done.drain(..excess);
            trace!(target: "state.undo", excess, "history_trimmed");
        }
    }

    /// Commit pending work and detach the current node for reverting. The
    /// caller reverts it and hands it back through [`UndoTree::push_undone`].
    pub fn take_undo(&mut self) -> Option<UndoNode> {
        self.commit();
        let node = self.done.pop();
        trace!(target: "state.undo", undo_depth = self.done.len(), redo_depth = self.undone.len(), found = node.is_some(), "undo_pop");
        node
    }

    pub fn push_undone(&mut self, node: UndoNode) {
        self.undone.push(node);
    }

    /// Detach the most recently undone node for re-applying. Pending work is
    /// committed first, which discards the redo side.
    pub fn take_redo(&mut self) -> Option<UndoNode> {
        self.commit();
        let node = self.undone.pop();
        trace!(target: "state.undo", undo_depth = self.done.len(), redo_depth = self.undone.len(), found = node.is_some(), "redo_pop");
        node
    }

    /// Return a re-applied node to the chain without touching the redo side.
    pub fn push_done(&mut self, node: UndoNode) {
        self.done.push(node);
        self.trim();
    }
}
