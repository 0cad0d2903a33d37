//! Display width of raw row bytes.
//!
//! Width is measured one step at a time from the start of a row:
//! - a tab runs to the next multiple of [`TAB_STOP`];
//! - a C0 control byte occupies [`CONTROL_WIDTH`] cells (rendered as `\xx`);
//! - any other byte below 0x80 occupies one cell;
//! - a byte at or above 0x80 begins a UTF-8 scalar. A scalar that decodes
//!   occupies `max(width, 1)` cells and advances by its encoded length. A byte
//!   that does not begin a complete, valid scalar is one malformed cell.
//!
//! Invariants:
//! - Every step has width >= 1, so display columns are strictly increasing in
//!   byte offset across scalar boundaries. `Row::render_to_cursor` relies on
//!   this to invert `Row::cursor_to_render`.
//! - Nothing else in the workspace calls `unicode_width` directly.

use unicode_width::UnicodeWidthChar;

/// Tab stop width in display cells.
pub const TAB_STOP: usize = 8;

/// Cells used by a rendered control byte (`\` plus two hex digits).
pub const CONTROL_WIDTH: usize = 3;

/// One measured unit of a row: `len` bytes occupying `width` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub len: usize,
    pub width: usize,
}

/// Decode the UTF-8 scalar starting at `bytes[0]`.
///
/// Returns the scalar and its encoded length, or `None` when the sequence is
/// truncated, overlong, a surrogate, or otherwise invalid.
pub fn decode_scalar(bytes: &[u8]) -> Option<(char, usize)> {
    let first = *bytes.first()?;
    let len = match first {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return None,
    };
    let chunk = bytes.get(..len)?;
    let s = std::str::from_utf8(chunk).ok()?;
    s.chars().next().map(|c| (c, len))
}

/// Display width of a decoded scalar, never less than one cell.
pub fn scalar_width(c: char) -> usize {
    c.width().unwrap_or(1).max(1)
}

/// Measure the unit starting at `at` when the display column so far is `col`.
/// Returns `None` once `at` reaches the end of `bytes`.
pub fn step(bytes: &[u8], at: usize, col: usize) -> Option<Step> {
    let b = *bytes.get(at)?;
    let s = match b {
        b'\t' => Step {
            len: 1,
            width: TAB_STOP - col % TAB_STOP,
        },
        0x00..=0x1f => Step {
            len: 1,
            width: CONTROL_WIDTH,
        },
        0x20..=0x7f => Step { len: 1, width: 1 },
        _ => match decode_scalar(&bytes[at..]) {
            Some((c, len)) => Step {
                len,
                width: scalar_width(c),
            },
            None => Step { len: 1, width: 1 },
        },
    };
    Some(s)
}

/// Total display width of `bytes` rendered from column 0.
pub fn display_width(bytes: &[u8]) -> usize {
    let (mut at, mut col) = (0usize, 0usize);
    while let Some(s) = step(bytes, at, col) {
        at += s.len;
        col += s.width;
    }
    col
}

/// True for UTF-8 continuation bytes (`10xxxxxx`).
#[inline]
pub fn is_continuation(b: u8) -> bool {
    b & 0xc0 == 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!(display_width(b"abc"), 3);
    }

    #[test]
    fn tab_runs_to_next_stop() {
        assert_eq!(display_width(b"\t"), 8);
        assert_eq!(display_width(b"ab\t"), 8);
        assert_eq!(display_width(b"abcdefgh\tx"), 17);
    }

    #[test]
    fn control_byte_is_three_cells() {
        assert_eq!(display_width(b"a\x01b"), 5);
    }

    #[test]
    fn wide_scalar() {
        assert_eq!(display_width("你好".as_bytes()), 4);
    }

    #[test]
    fn combining_mark_counts_one_cell() {
        // U+0301 has zero width; cells are never narrower than one.
        assert_eq!(display_width("e\u{301}".as_bytes()), 2);
    }

    #[test]
    fn malformed_bytes_are_one_cell_each() {
        assert_eq!(display_width(&[0xe4, 0xbd]), 2);
        assert_eq!(display_width(&[0xff, b'a']), 2);
        assert_eq!(decode_scalar(&[0xc0, 0x80]), None);
    }

    #[test]
    fn decode_reports_length() {
        assert_eq!(decode_scalar("é".as_bytes()), Some(('é', 2)));
        assert_eq!(decode_scalar("😀x".as_bytes()), Some(('😀', 4)));
    }
}
