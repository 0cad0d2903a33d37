//! Status bar composition.
//!
//! Two stages: `compose_status` turns a [`StatusContext`] into ordered
//! [`StatusSegment`]s, and `format_status` lays them out across the screen
//! width. The left half reads `N-ke: name - 9 lines`; the right half
//! `L1/9 C1  | M:clear ` is flushed to the last column and dropped when it
//! does not fit beside the left half.

use core_text::Position;
use std::fmt::Write as _;

/// Longest file name shown before truncation.
pub const NAME_WIDTH: usize = 20;

pub const NO_FILE: &str = "[no file]";

/// What the status bar needs to know about the editor.
pub struct StatusContext<'a> {
    /// `N`, `K` or `E` for the input mode.
    pub mode: char,
    pub dirty: bool,
    pub file_name: Option<&'a str>,
    pub rows: usize,
    pub cursor: Position,
    pub mark: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(char),
    Dirty(bool),
    FileName(&'a str),
    LineCount(usize),
    /// 1-based line, total lines and 1-based byte column.
    Position { line_1: usize, rows: usize, col_1: usize },
    /// 1-based mark column and line, or `None` when the mark is clear.
    Mark(Option<(usize, usize)>),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    vec![
        StatusSegment::Mode(ctx.mode),
        StatusSegment::Dirty(ctx.dirty),
        StatusSegment::FileName(ctx.file_name.unwrap_or(NO_FILE)),
        StatusSegment::LineCount(ctx.rows),
        StatusSegment::Position {
            line_1: ctx.cursor.row + 1,
            rows: ctx.rows,
            col_1: ctx.cursor.col + 1,
        },
        StatusSegment::Mark(ctx.mark.map(|m| (m.col + 1, m.row + 1))),
    ]
}

/// Render segments into exactly `cols` characters (fewer only when the left
/// half alone is wider than the screen).
pub fn format_status(segments: &[StatusSegment<'_>], cols: usize) -> String {
    let mut left = String::with_capacity(cols);
    let mut right = String::with_capacity(32);
    for seg in segments {
        match seg {
            StatusSegment::Mode(m) => left.push(*m),
            StatusSegment::Dirty(d) => left.push(if *d { '!' } else { '-' }),
            StatusSegment::FileName(name) => {
                left.push_str("ke: ");
                left.extend(name.chars().take(NAME_WIDTH));
            }
            StatusSegment::LineCount(n) => {
                let _ = write!(left, " - {n} lines");
            }
            StatusSegment::Position { line_1, rows, col_1 } => {
                let _ = write!(right, "L{line_1}/{rows} C{col_1} ");
            }
            StatusSegment::Mark(Some((x, y))) => {
                let _ = write!(right, " | M: {x}, {y} ");
            }
            StatusSegment::Mark(None) => right.push_str(" | M:clear "),
        }
    }

    let left_len = left.chars().count();
    if left_len >= cols {
        return left.chars().take(cols).collect();
    }
    let right_len = right.chars().count();
    let mut out = left;
    if left_len + right_len <= cols {
        out.extend(std::iter::repeat_n(' ', cols - left_len - right_len));
        out.push_str(&right);
    } else {
        out.extend(std::iter::repeat_n(' ', cols - left_len));
    }
    out
}

pub fn build_status(ctx: &StatusContext, cols: usize) -> String {
    format_status(&compose_status(ctx), cols)
}
