//! Mark/cursor region operations.
//!
//! The region is the span between the mark and the cursor in document order.
//! Every row boundary inside it counts as one newline byte.

use core_text::{Position, display_width, is_space_byte};
use tracing::debug;

use crate::document::Document;
use crate::error::EditError;
use crate::killring::{KillMode, KillRing};

/// Default right margin for [`Document::reflow_region`].
pub const REFLOW_MARGIN: usize = 72;

/// Unindent removes at most this many leading spaces.
const UNINDENT_SPACES: usize = 8;

impl Document {
    /// Ordered (start, end) of the region.
    pub fn region(&self) -> Result<(Position, Position), EditError> {
        let mark = self.clamp(self.mark().ok_or(EditError::NoMark)?);
        let cursor = self.cursor();
        Ok((mark.min(cursor), mark.max(cursor)))
    }

    /// Bytes in `[start, end)`, with a newline per row boundary.
    pub fn text_between(&self, start: Position, end: Position) -> Vec<u8> {
        let mut out = Vec::new();
        if start >= end {
            return out;
        }
        for r in start.row..=end.row {
            let Some(row) = self.row(r) else {
                break;
            };
            let raw = row.raw();
            let from = if r == start.row { start.col.min(raw.len()) } else { 0 };
            if r == end.row {
                out.extend_from_slice(&raw[from..end.col.clamp(from, raw.len())]);
            } else {
                out.extend_from_slice(&raw[from..]);
                out.push(b'\n');
            }
        }
        out
    }

    /// Characters (scalars, malformed bytes, and row breaks) in `[start, end)`,
    /// counted by walking the cursor rules.
    pub fn count_chars(&self, start: Position, end: Position) -> usize {
        let mut count = 0;
        let mut at = start;
        while at < end {
            let Some(row) = self.row(at.row) else {
                break;
            };
            if at.col < row.len() {
                at.col = row.next_boundary(at.col);
            } else {
                at = Position::new(at.row + 1, 0);
            }
            count += 1;
        }
        count
    }

    /// Copy the region into a fresh kill ring entry. The cursor does not move.
    pub fn kill_region(&mut self, kill: &mut KillRing) -> Result<usize, EditError> {
        let (start, end) = self.region()?;
        let text = self.text_between(start, end);
        kill.flush();
        kill.start_with(&text);
        debug!(target: "state.killring", len = text.len(), "kill_region");
        Ok(text.len())
    }

    /// Remove the region. Characters are counted first, then deleted forward
    /// one at a time from the region start, since row joins shift indices as
    /// deletion proceeds. The kill chain is left open.
    pub fn delete_region(&mut self, kill: &mut KillRing) -> Result<usize, EditError> {
        let (start, end) = self.region()?;
        let count = self.count_chars(start, end);
        self.set_cursor(start);
        let mut deleted = 0;
        for _ in 0..count {
            if self.delete_forward(KillMode::NoOp, kill).is_none() {
                break;
            }
            deleted += 1;
        }
        kill.open_chain();
        debug!(target: "state.document", count, deleted, "delete_region");
        Ok(deleted)
    }

    fn region_rows(&self) -> Result<Option<(usize, usize)>, EditError> {
        let (start, end) = self.region()?;
        let last = match self.row_count().checked_sub(1) {
            Some(l) => l,
            None => return Ok(None),
        };
        if start.row > last {
            return Ok(None);
        }
        Ok(Some((start.row, end.row.min(last))))
    }

    /// Prefix a tab to every row the region touches.
    pub fn indent_region(&mut self) -> Result<(), EditError> {
        let Some((first, last)) = self.region_rows()? else {
            return Ok(());
        };
        self.undo.record_snapshot(self.snapshot());
        for row in &mut self.rows_mut()[first..=last] {
            row.insert_byte(0, b'\t');
        }
        self.dirty = true;
        let row = self.cursor().row;
        self.set_cursor(Position::new(row, 0));
        Ok(())
    }

    /// Remove one leading tab, or up to eight leading spaces, from every row
    /// the region touches.
    pub fn unindent_region(&mut self) -> Result<(), EditError> {
        let Some((first, last)) = self.region_rows()? else {
            return Ok(());
        };
        self.undo.record_snapshot(self.snapshot());
        for row in &mut self.rows_mut()[first..=last] {
            match row.byte_at(0) {
                Some(b'\t') => {
                    row.delete_byte(0);
                }
                Some(b' ') => {
                    let n = row
                        .raw()
                        .iter()
                        .take(UNINDENT_SPACES)
                        .take_while(|&&b| b == b' ')
                        .count();
                    row.delete_range(0, n);
                }
                _ => {}
            }
        }
        self.dirty = true;
        self.set_cursor(Position::new(first, 0));
        Ok(())
    }

    /// Rewrap text so each row's indent plus content fits in `margin` columns.
    ///
    /// With a mark set the marked rows are rewrapped; otherwise the run of
    /// non-blank rows around the cursor is. Blank rows separate paragraphs and
    /// are kept. Each paragraph reuses its first row's leading whitespace.
    /// Returns the number of rows written.
    pub fn reflow_region(&mut self, margin: usize) -> Result<usize, EditError> {
        let n = self.row_count();
        if n == 0 {
            return Ok(0);
        }
        let (first, last) = if self.mark().is_some() {
            match self.region_rows()? {
                Some(span) => span,
                None => return Ok(0),
            }
        } else {
            let at = self.cursor().row.min(n - 1);
            let blank = |d: &Document, r: usize| d.row(r).is_none_or(|row| is_blank(row.raw()));
            let (mut first, mut last) = (at, at);
            while first > 0 && !blank(self, first - 1) {
                first -= 1;
            }
            while last + 1 < n && !blank(self, last + 1) {
                last += 1;
            }
            (first, last)
        };

        let source: Vec<&[u8]> = self.rows()[first..=last].iter().map(|r| r.raw()).collect();
        let lines = reflow_lines(&source, margin);
        let written = lines.len();
        self.replace_rows(first..last + 1, lines);
        self.set_mark(None);
        self.set_cursor(Position::new(first, 0));
        debug!(target: "state.document", first, last, written, margin, "reflow");
        Ok(written)
    }
}

fn is_blank(raw: &[u8]) -> bool {
    raw.iter().all(|&b| is_space_byte(b))
}

/// Greedy rewrap of `rows`; blank rows pass through as empty rows.
pub fn reflow_lines(rows: &[&[u8]], margin: usize) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < rows.len() {
        if is_blank(rows[i]) {
            out.push(Vec::new());
            i += 1;
            continue;
        }
        let indent_len = rows[i]
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        let indent = &rows[i][..indent_len];
        let indent_width = display_width(indent);
        let mut line: Vec<u8> = indent.to_vec();
        let mut width = indent_width;
        while i < rows.len() && !is_blank(rows[i]) {
            for word in rows[i].split(|&b| is_space_byte(b)).filter(|w| !w.is_empty()) {
                let w = display_width(word);
                if line.len() > indent_len && width + 1 + w > margin {
                    out.push(std::mem::replace(&mut line, indent.to_vec()));
                    width = indent_width;
                }
                if line.len() > indent_len {
                    line.push(b' ');
                    width += 1;
                }
                line.extend_from_slice(word);
                width += w;
            }
            i += 1;
        }
        if line.len() > indent_len {
            out.push(line);
        }
    }
    out
}
