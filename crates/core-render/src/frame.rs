//! Text area drawing.
//!
//! Each visible row is the document row's render form clipped to the
//! viewport by display column. Rows past the end of the document show a `|`
//! filler; an empty document shows the version banner a third of the way
//! down.

use crate::writer::Writer;
use core_state::Document;
use core_text::width;
use std::borrow::Cow;
use tracing::debug;

/// Visible part of a render form: display columns
/// `col_offset..col_offset + cols`. A wide scalar cut by the left edge is
/// replaced by spaces; one that would cross the right edge is left out.
pub fn visible_slice(render: &[u8], col_offset: usize, cols: usize) -> String {
    let end_col = col_offset + cols;
    let mut out = String::with_capacity(cols);
    let (mut at, mut col) = (0usize, 0usize);
    while let Some(s) = width::step(render, at, col) {
        let next = col + s.width;
        if next > end_col {
            break;
        }
        if col >= col_offset {
            out.push_str(&String::from_utf8_lossy(&render[at..at + s.len]));
        } else if next > col_offset {
            out.extend(std::iter::repeat_n(' ', next - col_offset));
        }
        at += s.len;
        col = next;
    }
    out
}

/// Version banner centred on a row that starts with the `|` filler.
pub fn banner_line(banner: &str, cols: usize) -> String {
    let len = banner.chars().count();
    let mut padding = cols.saturating_sub(len) / 2;
    let mut out = String::with_capacity(cols);
    if padding > 0 {
        out.push('|');
        padding -= 1;
    }
    out.extend(std::iter::repeat_n(' ', padding));
    out.extend(banner.chars().take(cols.saturating_sub(out.len())));
    out
}

/// Queue `text_rows` rows of `doc` starting at screen row 0.
pub fn draw_rows(doc: &Document, text_rows: usize, cols: usize, banner: &str, w: &mut Writer) {
    let vp = doc.viewport;
    for y in 0..text_rows {
        w.move_to(0, y as u16);
        let file_row = y + vp.row_offset;
        match doc.row(file_row) {
            Some(row) => {
                let render: Cow<'_, [u8]> = match row.rendered() {
                    Some(r) => Cow::Borrowed(r),
                    None => {
                        debug!(target: "render", row = file_row, "stale_render_rebuilt");
                        let mut fresh = row.clone();
                        Cow::Owned(fresh.render().to_vec())
                    }
                };
                w.print(visible_slice(&render, vp.col_offset, cols));
            }
            None if doc.row_count() == 0 && y == text_rows / 3 => {
                w.print(banner_line(banner, cols));
            }
            None => w.print("|"),
        }
        w.clear_to_eol();
    }
}
