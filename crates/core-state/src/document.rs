//! One open file or scratch buffer: rows, cursor, mark, viewport, and history.
//!
//! Rows are index-addressed. No method hands out a row reference that
//! outlives a call able to grow or shrink the row sequence; every edit
//! re-fetches rows by index after splicing.
//!
//! Cursor invariant: `cursor.row` is in `[0, row_count]` (equal to
//! `row_count` only on the virtual row past the end, where the column is 0)
//! and `cursor.col` is a character boundary within that row.

use core_text::{Position, Row};
use smallvec::{SmallVec, smallvec};
use std::ops::Range;
use tracing::trace;

use crate::error::EditError;
use crate::killring::{KillMode, KillRing};
use crate::undo::{Snapshot, UndoKind, UndoNode, UndoTree, text_end};

/// Display name of a document without a path.
pub const NO_NAME: &str = "[No Name]";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
}

#[derive(Debug, Default)]
pub struct Document {
    rows: Vec<Row>,
    cursor: Position,
    render_col: usize,
    pub viewport: Viewport,
    pub path: Option<String>,
    pub dirty: bool,
    mark: Option<Position>,
    pub undo: UndoTree,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clean document from whole lines (no terminators).
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut doc = Self::new();
        for line in lines {
            doc.append_row(line);
        }
        doc
    }

    /// Drop all content and per-document state, keeping the path.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.cursor = Position::origin();
        self.render_col = 0;
        self.viewport = Viewport::default();
        self.mark = None;
        self.dirty = false;
        self.undo.clear();
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn render_col(&self) -> usize {
        self.render_col
    }

    pub fn mark(&self) -> Option<Position> {
        self.mark
    }

    /// Raw row contents, lossily decoded. Mostly useful for assertions.
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| String::from_utf8_lossy(r.raw()).into_owned())
            .collect()
    }

    /// Basename of the path, or `[No Name]`.
    pub fn display_name(&self) -> &str {
        match self.path.as_deref() {
            Some(p) => p.rsplit('/').next().unwrap_or(p),
            None => NO_NAME,
        }
    }

    /// No path, not dirty, zero rows.
    pub fn is_unnamed_and_empty(&self) -> bool {
        self.path.is_none() && !self.dirty && self.rows.is_empty()
    }

    /// Clamp `pos` into the document and onto a character boundary.
    pub fn clamp(&self, pos: Position) -> Position {
        let mut p = pos;
        p.clamp_to(self.rows.len(), |r| self.rows[r].len());
        if let Some(row) = self.rows.get(p.row) {
            p.col = row.snap_to_boundary(p.col);
        }
        p
    }

    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
        self.debug_check_cursor();
    }

    fn debug_check_cursor(&self) {
        debug_assert!(self.cursor.row <= self.rows.len());
        debug_assert!(
            self.rows
                .get(self.cursor.row)
                .map_or(self.cursor.col == 0, |r| r.snap_to_boundary(self.cursor.col)
                    == self.cursor.col
                    && self.cursor.col <= r.len()),
            "cursor {:?} off a character boundary",
            self.cursor
        );
    }

    pub fn cursor_at_eol(&self) -> bool {
        self.rows
            .get(self.cursor.row)
            .is_none_or(|r| self.cursor.col >= r.len())
    }

    /// At the end of the last row, or on the virtual row past it.
    pub fn cursor_at_end(&self) -> bool {
        self.cursor.row + 1 >= self.rows.len() && self.cursor_at_eol()
    }

    /// Byte under the cursor; `None` at end of row.
    pub fn byte_under_cursor(&self) -> Option<u8> {
        self.rows.get(self.cursor.row)?.byte_at(self.cursor.col)
    }

    /// Append a row without touching cursor, dirty flag, or history.
    pub fn append_row(&mut self, bytes: impl Into<Vec<u8>>) {
        self.rows.push(Row::from_bytes(bytes));
    }

    /// Position just past the last row's content, when there is a last row.
    fn end_of_last_row(&self) -> Option<Position> {
        let last = self.rows.len().checked_sub(1)?;
        Some(Position::new(last, self.rows[last].len()))
    }

    pub fn insert_char(&mut self, c: u8, kill: &mut KillRing) {
        kill.break_chain();
        let before = self.cursor;
        if self.cursor.row >= self.rows.len() {
            // Growing onto the virtual row reads as a line break after the last row.
            if let Some(anchor) = self.end_of_last_row() {
                self.undo.record_insert(anchor, before, b"\n");
            }
            self.rows.push(Row::new());
            self.cursor = Position::new(self.rows.len() - 1, 0);
        }
        let at = self.cursor;
        self.rows[at.row].insert_byte(at.col, c);
        self.cursor.col += 1;
        self.dirty = true;
        self.undo.record_insert(at, before, &[c]);
    }

    /// Split the current row at the cursor; the cursor moves to the start of
    /// the new row.
    pub fn newline(&mut self, kill: &mut KillRing) {
        kill.break_chain();
        let at = self.cursor;
        if at.row >= self.rows.len() {
            match self.end_of_last_row() {
                Some(anchor) => self.undo.record_insert(anchor, at, b"\n"),
                None => self.undo.record_snapshot(self.snapshot()),
            }
            self.rows.push(Row::new());
            self.cursor = Position::new(self.rows.len(), 0);
        } else {
            // The tail is copied out before the row sequence grows.
            let tail = self.rows[at.row].split_off(at.col);
            self.rows.insert(at.row + 1, Row::from_bytes(tail));
            self.cursor = Position::new(at.row + 1, 0);
            self.undo.record_insert(at, at, b"\n");
        }
        self.dirty = true;
        trace!(target: "state.document", row = at.row, col = at.col, rows = self.rows.len(), "newline");
    }

    /// Delete the character before the cursor, joining rows at column 0.
    ///
    /// A join feeds a single `\n` to the kill ring; the removed row itself is
    /// never killed. Returns the removed bytes, or `None` at the start of the
    /// document or on the virtual row.
    pub fn delete_char(&mut self, mode: KillMode, kill: &mut KillRing) -> Option<SmallVec<[u8; 4]>> {
        let at = self.cursor;
        if at.row >= self.rows.len() || (at.row == 0 && at.col == 0) {
            return None;
        }
        let removed: SmallVec<[u8; 4]> = if at.col > 0 {
            let row = &mut self.rows[at.row];
            let start = row.prev_boundary(at.col);
            let bytes = row.delete_range(start, at.col);
            self.cursor.col = start;
            SmallVec::from_vec(bytes)
        } else {
            let merged = self.rows.remove(at.row);
            let prev = &mut self.rows[at.row - 1];
            let join = prev.len();
            prev.append(merged.raw());
            self.cursor = Position::new(at.row - 1, join);
            smallvec![b'\n']
        };
        self.dirty = true;
        self.undo.record_delete(self.cursor, at, &removed);
        kill.record(mode, &removed);
        self.debug_check_cursor();
        Some(removed)
    }

    /// Delete the character after the cursor by stepping right and deleting
    /// backward. No-op at the end of the document.
    pub fn delete_forward(&mut self, mode: KillMode, kill: &mut KillRing) -> Option<SmallVec<[u8; 4]>> {
        if self.cursor_at_end() {
            return None;
        }
        self.step_right();
        self.delete_char(mode, kill)
    }

    /// Remove row `at`, feeding its bytes plus a newline to the kill ring and
    /// extending an open chain.
    pub fn delete_row(&mut self, at: usize, kill: &mut KillRing) -> bool {
        if at >= self.rows.len() {
            return false;
        }
        self.undo.record_snapshot(self.snapshot());
        let row = self.rows.remove(at);
        let mut bytes = row.raw().to_vec();
        bytes.push(b'\n');
        if kill.is_chaining() {
            kill.append(&bytes);
        } else {
            kill.start_with(&bytes);
        }
        kill.open_chain();
        self.dirty = true;
        self.cursor = self.clamp(self.cursor);
        trace!(target: "state.document", at, killed = bytes.len(), "delete_row");
        true
    }

    /// Yank the kill ring at the cursor; newline bytes become row breaks.
    pub fn yank(&mut self, kill: &mut KillRing) -> Result<usize, EditError> {
        let content = kill.content().ok_or(EditError::EmptyKillRing)?.to_vec();
        for &b in &content {
            if b == b'\n' {
                self.newline(kill);
            } else {
                self.insert_char(b, kill);
            }
        }
        Ok(content.len())
    }

    pub fn toggle_mark(&mut self) -> bool {
        if self.mark.take().is_some() {
            return false;
        }
        self.mark = Some(self.cursor);
        true
    }

    pub fn set_mark(&mut self, pos: Option<Position>) {
        self.mark = pos.map(|p| self.clamp(p));
    }

    /// Exchange cursor and mark.
    pub fn swap_mark(&mut self) -> Result<(), EditError> {
        let mark = self.mark.ok_or(EditError::NoMark)?;
        self.mark = Some(self.cursor);
        self.set_cursor(mark);
        Ok(())
    }

    /// Clamped jump; an empty document always lands on the origin.
    pub fn jump_to_position(&mut self, col: usize, row: usize) {
        if self.rows.is_empty() {
            self.cursor = Position::origin();
            return;
        }
        let row = row.min(self.rows.len() - 1);
        self.set_cursor(Position::new(row, col));
    }

    /// Go to 1-based line `n`, clamped into `[1, row_count]`.
    pub fn goto_line(&mut self, n: usize) {
        let n = n.clamp(1, self.rows.len().max(1));
        self.jump_to_position(0, n - 1);
    }

    /// Rebuild stale render forms for rows in `range`.
    pub fn refresh_render(&mut self, range: Range<usize>) {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        for row in &mut self.rows[start..end] {
            if row.is_render_dirty() {
                row.update_render();
            }
        }
    }

    /// Recompute `render_col` and move the viewport so the cursor is visible.
    pub fn scroll(&mut self, screen_rows: usize, screen_cols: usize) {
        self.render_col = self
            .rows
            .get(self.cursor.row)
            .map_or(0, |r| r.cursor_to_render(self.cursor.col));
        let vp = &mut self.viewport;
        if self.cursor.row < vp.row_offset {
            vp.row_offset = self.cursor.row;
        }
        if screen_rows > 0 && self.cursor.row >= vp.row_offset + screen_rows {
            vp.row_offset = self.cursor.row + 1 - screen_rows;
        }
        if self.render_col < vp.col_offset {
            vp.col_offset = self.render_col;
        }
        if screen_cols > 0 && self.render_col >= vp.col_offset + screen_cols {
            vp.col_offset = self.render_col + 1 - screen_cols;
        }
    }

    /// Put the cursor row in the middle of the screen.
    pub fn recenter(&mut self, screen_rows: usize) {
        self.viewport.row_offset = self.cursor.row.saturating_sub(screen_rows / 2);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.rows.iter().map(|r| r.raw().to_vec()).collect(),
            cursor: self.cursor,
        }
    }

    /// Replace rows `range` with `lines`, recording one structural undo node.
    pub(crate) fn replace_rows(&mut self, range: Range<usize>, lines: Vec<Vec<u8>>) {
        self.undo.record_snapshot(self.snapshot());
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        self.rows
            .splice(start..end, lines.into_iter().map(Row::from_bytes));
        self.dirty = true;
    }

    /// Mutable access to rows for structural edits that record their own
    /// snapshot first.
    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Insert `text` at `at` without touching history or the kill ring.
    /// Returns the position just past the inserted text.
    fn splice_in(&mut self, at: Position, text: &[u8]) -> Position {
        let at = self.clamp(at);
        if at.row >= self.rows.len() {
            self.rows.push(Row::new());
        }
        let tail = self.rows[at.row].split_off(at.col);
        let mut pieces = text.split(|&b| b == b'\n');
        if let Some(first) = pieces.next() {
            self.rows[at.row].append(first);
        }
        let mut row = at.row;
        for piece in pieces {
            row += 1;
            self.rows.insert(row, Row::from_bytes(piece.to_vec()));
        }
        let end = Position::new(row, self.rows[row].len());
        self.rows[row].append(&tail);
        end
    }

    /// Remove `[start, end)` where each row boundary counts as one newline.
    fn splice_out(&mut self, start: Position, end: Position) -> Vec<u8> {
        let start = self.clamp(start);
        let mut end = self.clamp(end);
        if end.row >= self.rows.len()
            && let Some(last) = self.end_of_last_row()
        {
            end = last;
        }
        if start >= end || start.row >= self.rows.len() {
            return Vec::new();
        }
        if start.row == end.row {
            return self.rows[start.row].delete_range(start.col, end.col);
        }
        let mut removed = self.rows[start.row].split_off(start.col);
        let tail = self.rows[end.row].split_off(end.col);
        for row in self.rows.drain(start.row + 1..=end.row) {
            removed.push(b'\n');
            removed.extend_from_slice(row.raw());
        }
        self.rows[start.row].append(&tail);
        removed
    }

    fn swap_snapshot(&mut self, node: &mut UndoNode) {
        if let Some(snap) = node.snapshot.as_mut() {
            let current = Snapshot {
                rows: self.rows.iter().map(|r| r.raw().to_vec()).collect(),
                cursor: self.cursor,
            };
            let restored = std::mem::replace(snap, current);
            self.rows = restored.rows.into_iter().map(Row::from_bytes).collect();
            self.cursor = restored.cursor;
        }
    }

    /// Revert the current history node.
    pub fn undo(&mut self) -> Result<(), EditError> {
        let mut node = self.undo.take_undo().ok_or(EditError::NothingToUndo)?;
        match node.kind {
            UndoKind::Insert => {
                self.splice_out(node.start(), node.end());
                self.cursor = node.start();
            }
            UndoKind::Delete => {
                self.splice_in(node.start(), &node.text);
                self.cursor = node.cursor;
            }
            UndoKind::Unknown => self.swap_snapshot(&mut node),
        }
        trace!(target: "state.undo", kind = ?node.kind, row = node.row, col = node.col, len = node.text.len(), "undo_applied");
        self.undo.push_undone(node);
        self.after_history_step();
        Ok(())
    }

    /// Re-apply the most recently undone node.
    pub fn redo(&mut self) -> Result<(), EditError> {
        let mut node = self.undo.take_redo().ok_or(EditError::NothingToRedo)?;
        match node.kind {
            UndoKind::Insert => {
                self.cursor = self.splice_in(node.start(), &node.text);
            }
            UndoKind::Delete => {
                self.splice_out(node.start(), text_end(node.start(), &node.text));
                self.cursor = node.start();
            }
            UndoKind::Unknown => self.swap_snapshot(&mut node),
        }
        trace!(target: "state.undo", kind = ?node.kind, row = node.row, col = node.col, len = node.text.len(), "redo_applied");
        self.undo.push_done(node);
        self.after_history_step();
        Ok(())
    }

    fn after_history_step(&mut self) {
        self.cursor = self.clamp(self.cursor);
        if let Some(m) = self.mark {
            self.mark = Some(self.clamp(m));
        }
        self.dirty = true;
        self.debug_check_cursor();
    }
}
