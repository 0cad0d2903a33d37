//! Cursor motion and word-wise movement/deletion.
//!
//! Horizontal steps move by whole characters (continuation bytes are
//! skipped) and wrap across row ends. Vertical steps keep the column when
//! possible; interactive vertical steps also skip forward over leading
//! whitespace so the cursor lands on text.

use core_text::{Position, is_space_byte, is_word_byte};

use crate::document::Document;
use crate::killring::{KillMode, KillRing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}

impl Document {
    /// One motion step. `page` is the number of text rows on screen.
    pub fn move_cursor(&mut self, dir: Direction, interactive: bool, page: usize) {
        match dir {
            Direction::Up => {
                let at = self.cursor();
                if at.row > 0 {
                    self.step_vertical(at.row - 1, interactive);
                }
            }
            Direction::Down => {
                let at = self.cursor();
                if at.row + 1 < self.row_count() {
                    self.step_vertical(at.row + 1, interactive);
                }
            }
            Direction::Right => self.step_right(),
            Direction::Left => self.step_left(),
            Direction::PageUp | Direction::PageDown => {
                let page = page.max(1);
                let top = self.viewport.row_offset;
                let (start, step) = if dir == Direction::PageUp {
                    (top, Direction::Up)
                } else {
                    ((top + page - 1).min(self.row_count()), Direction::Down)
                };
                let col = self.cursor().col;
                self.set_cursor(Position::new(start, col));
                for _ in 1..page {
                    self.move_cursor(step, true, page);
                }
            }
            Direction::Home => {
                let row = self.cursor().row;
                self.set_cursor(Position::new(row, 0));
            }
            Direction::End => {
                let row = self.cursor().row;
                if let Some(len) = self.row(row).map(|r| r.len()) {
                    self.set_cursor(Position::new(row, len));
                }
            }
        }
    }

    fn step_vertical(&mut self, row: usize, interactive: bool) {
        let col = self.cursor().col;
        let Some(r) = self.row(row) else {
            self.set_cursor(Position::new(row, 0));
            return;
        };
        let mut col = r.snap_to_boundary(col);
        if interactive {
            while r.byte_at(col).is_some_and(is_space_byte) {
                col += 1;
            }
        }
        self.set_cursor(Position::new(row, col));
    }

    pub(crate) fn step_right(&mut self) {
        let at = self.cursor();
        let Some(row) = self.row(at.row) else {
            return;
        };
        if at.col < row.len() {
            let next = row.next_boundary(at.col);
            self.set_cursor(Position::new(at.row, next));
        } else if at.row + 1 < self.row_count() {
            self.set_cursor(Position::new(at.row + 1, 0));
        }
    }

    pub(crate) fn step_left(&mut self) {
        let at = self.cursor();
        if at.col > 0 {
            let prev = self.row(at.row).map_or(0, |r| r.prev_boundary(at.col));
            self.set_cursor(Position::new(at.row, prev));
        } else if at.row > 0 {
            let len = self.row(at.row - 1).map_or(0, |r| r.len());
            self.set_cursor(Position::new(at.row - 1, len));
        }
    }

    /// Beginning of the document.
    pub fn move_to_start(&mut self) {
        self.set_cursor(Position::origin());
    }

    /// The virtual row past the last row.
    pub fn move_to_end(&mut self) {
        let n = self.row_count();
        self.set_cursor(Position::new(n, 0));
    }

    fn under_cursor_is_space(&self) -> bool {
        self.byte_under_cursor().is_some_and(is_space_byte)
    }

    /// Move to the end of the next word. Whitespace runs are skipped once
    /// before landing; a lone punctuation byte is stepped over.
    pub fn find_next_word(&mut self) {
        self.next_word_walk(&mut |doc| doc.step_right());
    }

    /// Delete forward up to the end of the next word, appending to the kill ring.
    pub fn delete_next_word(&mut self, kill: &mut KillRing) {
        self.next_word_walk(&mut |doc| {
            doc.delete_forward(KillMode::Append, kill);
        });
    }

    fn next_word_walk(&mut self, advance: &mut dyn FnMut(&mut Document)) {
        for attempt in 0..2 {
            while self.cursor_at_eol() && !self.cursor_at_end() {
                advance(self);
            }
            let Some(b) = self.byte_under_cursor() else {
                return;
            };
            if is_word_byte(b) {
                while !self.cursor_at_eol() && !self.under_cursor_is_space() {
                    advance(self);
                }
                return;
            }
            if !is_space_byte(b) {
                advance(self);
                return;
            }
            while self.under_cursor_is_space() {
                advance(self);
            }
            if attempt == 1 {
                return;
            }
        }
    }

    /// Move to the start of the previous word.
    pub fn find_prev_word(&mut self) {
        if self.cursor() == Position::origin() {
            return;
        }
        self.step_left();
        while self.cursor_at_eol() || self.under_cursor_is_space() {
            if self.cursor() == Position::origin() {
                return;
            }
            self.step_left();
        }
        while self.byte_before_cursor().is_some_and(|b| !is_space_byte(b)) {
            self.step_left();
        }
    }

    /// Delete backward to the start of the previous word, prepending to the
    /// kill ring.
    pub fn delete_prev_word(&mut self, kill: &mut KillRing) {
        if self.cursor() == Position::origin() {
            return;
        }
        self.delete_char(KillMode::Prepend, kill);
        while self.cursor() != Position::origin() {
            let at_row_start = self.cursor().col == 0;
            if !at_row_start && !self.byte_before_cursor().is_some_and(is_space_byte) {
                break;
            }
            self.delete_char(KillMode::Prepend, kill);
        }
        while self.byte_before_cursor().is_some_and(|b| !is_space_byte(b)) {
            self.delete_char(KillMode::Prepend, kill);
        }
    }

    fn byte_before_cursor(&self) -> Option<u8> {
        let at = self.cursor();
        let col = at.col.checked_sub(1)?;
        self.row(at.row)?.byte_at(col)
    }

    /// Delete from the cursor back to the start of its row.
    pub fn delete_to_line_start(&mut self, kill: &mut KillRing) {
        while self.cursor().col > 0 {
            self.delete_char(KillMode::Prepend, kill);
        }
    }

    /// Kill from the cursor to the end of the row. On an empty row the row
    /// itself is removed. With `count > 1`, the following line breaks and
    /// tails are killed into the same entry.
    pub fn kill_line(&mut self, count: usize, kill: &mut KillRing) {
        let at = self.cursor();
        if at.col == 0 && self.cursor_at_eol() {
            self.delete_row(at.row, kill);
            return;
        }
        for i in 0..count.max(1) {
            while !self.cursor_at_eol() {
                if self.delete_forward(KillMode::Append, kill).is_none() {
                    return;
                }
            }
            if i + 1 < count && self.delete_forward(KillMode::Append, kill).is_none() {
                return;
            }
        }
    }
}
