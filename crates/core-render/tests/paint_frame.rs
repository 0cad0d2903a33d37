use core_render::writer::Command;
use core_render::{BANNER, View, Writer, paint};
use core_state::{Document, EditorState};
use core_text::Position;
use pretty_assertions::assert_eq;

fn state_with(lines: &[&str], cols: usize, rows: usize) -> EditorState {
    let mut st = EditorState::default();
    st.resize(cols, rows);
    if !lines.is_empty() {
        *st.current_doc_mut() = Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()));
    }
    let text_rows = st.text_rows();
    let doc = st.current_doc_mut();
    doc.scroll(text_rows, cols);
    doc.refresh_render(0..text_rows);
    st
}

fn frame(st: &EditorState, view: View) -> Vec<Command> {
    let mut w = Writer::new();
    paint(st, &view, &mut w);
    w.commands().to_vec()
}

/// Text printed after each `MoveTo(0, y)`, keyed by row.
fn row_text(cmds: &[Command], y: u16) -> String {
    let mut out = String::new();
    let mut on_row = false;
    for c in cmds {
        match c {
            Command::MoveTo(0, row) => on_row = *row == y,
            Command::MoveTo(..) => on_row = false,
            Command::Print(s) if on_row => out.push_str(s),
            _ => {}
        }
    }
    out
}

const NORMAL: View<'static> = View { mode: 'N', prompt: None };

#[test]
fn rows_then_filler_then_status() {
    let st = state_with(&["one", "\ttwo"], 40, 6);
    let cmds = frame(&st, NORMAL);
    assert_eq!(row_text(&cmds, 0), "one");
    assert_eq!(row_text(&cmds, 1), "        two");
    assert_eq!(row_text(&cmds, 2), "|");
    assert_eq!(row_text(&cmds, 3), "|");
    let status = row_text(&cmds, 4);
    assert!(status.starts_with("N-ke: [no file] - 2 lines"));
    assert!(status.ends_with("L1/2 C1  | M:clear "));
    assert_eq!(status.chars().count(), 40);
}

#[test]
fn empty_document_shows_banner() {
    let st = state_with(&[], 40, 8);
    let cmds = frame(&st, NORMAL);
    // Six text rows; the banner sits on row 2.
    assert!(row_text(&cmds, 2).ends_with(BANNER));
    assert!(row_text(&cmds, 2).starts_with('|'));
    assert_eq!(row_text(&cmds, 0), "|");
}

#[test]
fn cursor_is_placed_last_at_render_column() {
    let mut st = state_with(&["\tab"], 40, 6);
    st.current_doc_mut().set_cursor(Position::new(0, 2));
    let text_rows = st.text_rows();
    st.current_doc_mut().scroll(text_rows, 40);
    let cmds = frame(&st, NORMAL);
    let n = cmds.len();
    assert_eq!(cmds[n - 1], Command::ShowCursor);
    assert_eq!(cmds[n - 2], Command::MoveTo(9, 0));
}

#[test]
fn horizontal_scroll_clips_rows() {
    let mut st = state_with(&["abcdefghijklmnop"], 10, 6);
    st.current_doc_mut().set_cursor(Position::new(0, 15));
    let text_rows = st.text_rows();
    st.current_doc_mut().scroll(text_rows, 10);
    let cmds = frame(&st, NORMAL);
    assert_eq!(row_text(&cmds, 0), "ghijklmnop");
    let n = cmds.len();
    assert_eq!(cmds[n - 2], Command::MoveTo(9, 0));
}

#[test]
fn status_message_on_bottom_line() {
    let mut st = state_with(&["x"], 40, 6);
    st.set_status("Mark set.");
    let cmds = frame(&st, NORMAL);
    assert_eq!(row_text(&cmds, 5), "Mark set.");
}

#[test]
fn prompt_owns_bottom_line_and_cursor() {
    let st = state_with(&["x"], 40, 6);
    let cmds = frame(
        &st,
        View {
            mode: 'N',
            prompt: Some("Line: 12"),
        },
    );
    assert_eq!(row_text(&cmds, 5), "Line: 12");
    let n = cmds.len();
    assert_eq!(cmds[n - 2], Command::MoveTo(8, 5));
}

#[test]
fn dirty_document_with_mark() {
    let mut st = state_with(&["hello"], 60, 6);
    let doc = st.current_doc_mut();
    doc.path = Some("notes.txt".into());
    doc.dirty = true;
    doc.set_mark(Some(Position::new(0, 3)));
    let cmds = frame(&st, View { mode: 'K', prompt: None });
    let status = row_text(&cmds, 4);
    assert!(status.starts_with("K!ke: notes.txt - 1 lines"));
    assert!(status.ends_with("L1/1 C1  | M: 4, 1 "));
}
