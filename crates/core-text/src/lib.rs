//! Byte-oriented line storage with a cached display form.
//!
//! A [`Row`] owns one line of raw bytes (no terminator). Rows are not required
//! to hold valid UTF-8: malformed bytes are measured and rendered one cell at a
//! time. Cursor positions are byte offsets; display columns are derived through
//! the [`width`] module so that tabs, control bytes and wide scalars map
//! consistently in both directions.

pub mod row;
pub mod width;
pub mod word;

pub use row::Row;
pub use width::{TAB_STOP, decode_scalar, display_width, scalar_width};
pub use word::{is_space_byte, is_word_byte};

/// A position inside a document expressed as (row index, byte offset within that row).
///
/// Field order gives document order: comparison is by row first, then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Clamp into `[0, row_count]` rows and `[0, len(row)]` bytes.
    ///
    /// `row_count` itself is a valid row (the virtual row past the end) whose
    /// only valid column is 0.
    pub fn clamp_to<F>(&mut self, row_count: usize, mut row_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if self.row >= row_count {
            self.row = row_count;
            self.col = 0;
            return;
        }
        let max_len = row_len_fn(self.row);
        if self.col > max_len {
            self.col = max_len;
        }
    }
}
