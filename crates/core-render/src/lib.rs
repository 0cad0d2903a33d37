//! Read-only screen painter.
//!
//! A frame is the text area, a reverse-video status bar and a message line,
//! queued on a [`Writer`] and flushed in one write. Painting never mutates
//! editor state: the dispatcher has already scrolled the viewport and
//! refreshed the render form of every visible row.

use core_state::EditorState;
use std::time::Instant;
use tracing::trace;

pub mod frame;
pub mod status;
pub mod writer;

pub use status::{StatusContext, build_status};
pub use writer::Writer;

/// Banner drawn on an empty document.
pub const BANNER: &str = concat!("ke ", env!("CARGO_PKG_VERSION"));

/// Per-frame inputs that live outside [`EditorState`].
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// `N`, `K` or `E` for the input mode.
    pub mode: char,
    /// Label and input of the open prompt, if any.
    pub prompt: Option<&'a str>,
}

/// Text shown on the bottom line: the prompt (with any status after it) or
/// the live status message.
pub fn message_line(state: &EditorState, view: &View) -> String {
    match (view.prompt, state.status_text()) {
        (Some(p), Some(s)) => format!("{p}  {s}"),
        (Some(p), None) => p.to_string(),
        (None, Some(s)) => s.to_string(),
        (None, None) => String::new(),
    }
}

/// Queue a full frame for `state` on `w`.
pub fn paint(state: &EditorState, view: &View, w: &mut Writer) {
    let started = Instant::now();
    let doc = state.current_doc();
    let cols = state.screen_cols;
    let text_rows = state.text_rows();

    w.hide_cursor();
    frame::draw_rows(doc, text_rows, cols, BANNER, w);

    let ctx = StatusContext {
        mode: view.mode,
        dirty: doc.dirty,
        file_name: doc.path.as_deref(),
        rows: doc.row_count(),
        cursor: doc.cursor(),
        mark: doc.mark(),
    };
    w.move_to(0, text_rows as u16);
    w.reverse(true);
    w.print(build_status(&ctx, cols));
    w.reverse(false);

    let msg_row = (text_rows + 1) as u16;
    let msg: String = message_line(state, view).chars().take(cols).collect();
    w.move_to(0, msg_row);
    w.print(msg);
    w.clear_to_eol();

    match view.prompt {
        Some(p) => {
            let x = core_text::width::display_width(p.as_bytes()).min(cols.saturating_sub(1));
            w.move_to(x as u16, msg_row);
        }
        None => {
            let vp = doc.viewport;
            let y = doc.cursor().row.saturating_sub(vp.row_offset).min(text_rows - 1);
            let x = doc.render_col().saturating_sub(vp.col_offset);
            w.move_to(x as u16, y as u16);
        }
    }
    w.show_cursor();

    let ns = started.elapsed().as_nanos() as u64;
    trace!(target: "render", ns, rows = text_rows, cols, "frame_painted");
}
