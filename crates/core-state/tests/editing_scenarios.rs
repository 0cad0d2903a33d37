use core_state::{BufferSet, Direction, Document, EditorState, KillMode, KillRing};
use core_text::Position;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn doc(lines: &[&str]) -> Document {
    Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()))
}

#[test]
fn newline_then_type_splits_row() {
    let mut k = KillRing::new();
    let mut d = doc(&["hello", "world"]);
    d.set_cursor(Position::new(0, 5));
    d.newline(&mut k);
    d.insert_char(b'!', &mut k);
    assert_eq!(d.lines(), vec!["hello", "!", "world"]);
    assert_eq!(d.cursor(), Position::new(1, 1));
}

#[test]
fn kill_region_then_yank_reproduces_rows() {
    let mut k = KillRing::new();
    let mut d = doc(&["ab", "cdefg"]);
    d.set_mark(Some(Position::new(0, 0)));
    d.set_cursor(Position::new(1, 5));
    d.kill_region(&mut k).unwrap();
    assert_eq!(k.content(), Some(&b"ab\ncdefg"[..]));

    let mut fresh = Document::new();
    fresh.yank(&mut k).unwrap();
    assert_eq!(fresh.lines(), vec!["ab", "cdefg"]);
    assert_eq!(fresh.cursor(), Position::new(1, 5));
}

#[test]
fn delete_region_then_undo_restores_text() {
    let mut k = KillRing::new();
    let mut d = doc(&["one two", "three"]);
    d.set_mark(Some(Position::new(0, 4)));
    d.set_cursor(Position::new(1, 2));
    d.delete_region(&mut k).unwrap();
    assert_eq!(d.lines(), vec!["one ree"]);
    d.undo().unwrap();
    assert_eq!(d.lines(), vec!["one two", "three"]);
    d.redo().unwrap();
    assert_eq!(d.lines(), vec!["one ree"]);
}

#[test]
fn unmarked_paragraph_reflows_greedily() {
    let mut d = doc(&["aaaa bbbb cccc dddd"]);
    d.reflow_region(10).unwrap();
    assert_eq!(d.lines(), vec!["aaaa bbbb", "cccc dddd"]);
}

#[test]
fn motion_breaks_kill_chain_between_deletes() {
    let mut st = EditorState::default();
    st.current_doc_mut().append_row("abcdef");
    {
        let (d, k) = st.doc_and_kill();
        for _ in 0..3 {
            d.delete_forward(KillMode::Append, k);
        }
    }
    assert_eq!(st.kill_ring.content(), Some(&b"abc"[..]));
    st.kill_ring.break_chain();
    st.current_doc_mut().move_cursor(Direction::Right, true, 1);
    let (d, k) = st.doc_and_kill();
    d.delete_forward(KillMode::Append, k);
    assert_eq!(st.kill_ring.content(), Some(&b"e"[..]));
    assert_eq!(st.current_doc().lines(), vec!["df"]);
}

#[test]
fn kill_ring_is_shared_across_documents() {
    let mut st = EditorState::default();
    st.current_doc_mut().append_row("keep me");
    {
        let (d, k) = st.doc_and_kill();
        d.delete_row(0, k);
    }
    let other = st.add_document(Document::new());
    st.buffers.switch(other);
    let (d, k) = st.doc_and_kill();
    d.yank(k).unwrap();
    assert_eq!(st.current_doc().lines(), vec!["keep me", ""]);
}

#[test]
fn closing_last_buffer_keeps_one_empty() {
    let mut set = BufferSet::new();
    set.current_mut().append_row("x");
    set.current_mut().path = Some("a.txt".into());
    set.close_current();
    assert_eq!(set.len(), 1);
    assert!(set.current().is_unnamed_and_empty());
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u8),
    Newline,
    Backspace,
    Forward,
    Move(u8),
    KillLine,
    Yank,
    Undo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => prop::sample::select(b"ab \t\x01".to_vec()).prop_map(Op::Insert),
        1 => Just(Op::Newline),
        2 => Just(Op::Backspace),
        1 => Just(Op::Forward),
        3 => (0u8..8).prop_map(Op::Move),
        1 => Just(Op::KillLine),
        1 => Just(Op::Yank),
        1 => Just(Op::Undo),
    ]
}

fn direction(n: u8) -> Direction {
    match n {
        0 => Direction::Up,
        1 => Direction::Down,
        2 => Direction::Left,
        3 => Direction::Right,
        4 => Direction::PageUp,
        5 => Direction::PageDown,
        6 => Direction::Home,
        _ => Direction::End,
    }
}

proptest! {
    #[test]
    fn cursor_stays_in_bounds(ops in prop::collection::vec(op(), 0..80)) {
        let mut k = KillRing::new();
        let mut d = doc(&["seed", "héllo wörld"]);
        for op in ops {
            match op {
                Op::Insert(b) => d.insert_char(b, &mut k),
                Op::Newline => d.newline(&mut k),
                Op::Backspace => { d.delete_char(KillMode::Prepend, &mut k); }
                Op::Forward => { d.delete_forward(KillMode::Append, &mut k); }
                Op::Move(n) => {
                    k.break_chain();
                    d.move_cursor(direction(n), true, 5);
                }
                Op::KillLine => d.kill_line(1, &mut k),
                Op::Yank => { let _ = d.yank(&mut k); }
                Op::Undo => { let _ = d.undo(); }
            }
            let c = d.cursor();
            prop_assert!(c.row <= d.row_count());
            match d.row(c.row) {
                Some(row) => {
                    prop_assert!(c.col <= row.len());
                    prop_assert!(std::str::from_utf8(&row.raw()[..c.col]).is_ok());
                }
                None => prop_assert_eq!(c.col, 0),
            }
        }
    }
}
