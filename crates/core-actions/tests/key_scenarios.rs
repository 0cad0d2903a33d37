mod common;
use common::*;

use core_actions::InputMode;
use core_text::Position;
use pretty_assertions::assert_eq;

#[test]
fn typing_then_undo_and_redo() {
    let mut h = Harness::new(&["abc"]);
    h.at(0, 3).type_text("XY");
    assert_eq!(h.lines(), vec!["abcXY"]);
    h.press("C-k u");
    assert_eq!(h.lines(), vec!["abc"]);
    h.press("C-k U");
    assert_eq!(h.lines(), vec!["abcXY"]);
    h.press("C-k U");
    assert_eq!(h.status(), Some("Nothing to redo."));
}

#[test]
fn kill_line_twice_then_yank_restores() {
    let mut h = Harness::new(&["one", "two"]);
    h.press("C-k d");
    assert_eq!(h.lines(), vec!["", "two"]);
    assert_eq!(h.kill().as_deref(), Some("one"));
    h.press("C-k d");
    assert_eq!(h.lines(), vec!["two"]);
    assert_eq!(h.kill().as_deref(), Some("one\n"));
    h.press("C-y");
    assert_eq!(h.lines(), vec!["one", "two"]);
    assert_eq!(h.cursor(), Position::new(1, 0));
}

#[test]
fn counted_kill_line_takes_the_breaks() {
    let mut h = Harness::new(&["ab", "cd", "ef"]);
    h.press("C-u 2 C-k d");
    assert_eq!(h.lines(), vec!["", "ef"]);
    assert_eq!(h.kill().as_deref(), Some("ab\ncd"));
}

#[test]
fn mark_word_cut_and_yank_elsewhere() {
    let mut h = Harness::new(&["alpha beta"]);
    h.press("C-k SPC");
    assert_eq!(h.status(), Some("Mark set."));
    h.press("ESC f C-w");
    assert_eq!(h.lines(), vec![" beta"]);
    assert_eq!(h.kill().as_deref(), Some("alpha"));
    h.press("END C-y");
    assert_eq!(h.lines(), vec![" betaalpha"]);
}

#[test]
fn motion_breaks_the_kill_chain() {
    let mut h = Harness::new(&["abcdef"]);
    h.at(0, 6).press("BS BS");
    assert_eq!(h.kill().as_deref(), Some("ef"));
    h.press("LEFT BS");
    assert_eq!(h.lines(), vec!["abd"]);
    assert_eq!(h.kill().as_deref(), Some("c"));
}

#[test]
fn indent_and_unindent_region() {
    let mut h = Harness::new(&["a", "b", "c"]);
    h.press("C-k SPC DOWN C-k =");
    assert_eq!(h.lines(), vec!["\ta", "\tb", "c"]);
    h.press("C-k -");
    assert_eq!(h.lines(), vec!["a", "b", "c"]);
    assert_eq!(h.status(), Some("Region unindented"));
}

#[test]
fn reflow_uses_configured_margin() {
    let mut h = Harness::new(&["aaa bbb ccc ddd"]);
    h.state.settings.reflow_margin = 10;
    h.press("ESC q");
    assert_eq!(h.lines(), vec!["aaa bbb", "ccc ddd"]);
    assert_eq!(h.status(), Some("Reflowed to 10 columns"));
}

#[test]
fn quitting_dirty_editor_asks_twice() {
    let mut h = Harness::new(&[]);
    h.type_text("x").press("C-k q");
    assert!(!h.last.quit);
    assert_eq!(h.status(), Some("File not saved - C-k q again to quit."));

    h.press("RIGHT C-k q");
    assert!(!h.last.quit, "another command re-arms the warning");

    h.press("C-k q");
    assert!(h.last.quit);
}

#[test]
fn force_quit_ignores_changes() {
    let mut h = Harness::new(&[]);
    h.type_text("x").press("C-k C-q");
    assert!(h.last.quit);
}

#[test]
fn clean_editor_quits_at_once() {
    let mut h = Harness::new(&["x"]);
    h.press("C-k q");
    assert!(h.last.quit);
}

#[test]
fn escape_prefix_returns_to_normal() {
    let mut h = Harness::new(&["x"]);
    h.press("ESC");
    assert_eq!(h.session.mode(), InputMode::Escape);
    h.press("C-g");
    assert_eq!(h.session.mode(), InputMode::Normal);
    h.press("ESC z");
    assert_eq!(h.status(), Some("unknown ESC key: 007a"));
}

#[test]
fn incremental_search_steps_and_cancels() {
    let mut h = Harness::new(&["foo", "bar", "foo bar"]);
    h.press("C-s").type_text("bar");
    assert_eq!(h.cursor(), Position::new(1, 0));
    h.press("C-s");
    assert_eq!(h.cursor(), Position::new(2, 4));
    h.press("RET");
    assert!(h.session.prompt().is_none());
    assert_eq!(h.cursor(), Position::new(2, 4));

    h.press("C-s").type_text("zzz");
    assert_eq!(h.status(), Some("Failing search: zzz"));
    h.press("ESC");
    assert_eq!(h.cursor(), Position::new(2, 4));
}

#[test]
fn goto_line_prompt() {
    let mut h = Harness::new(&["a", "b", "c"]);
    h.press("C-k g");
    assert_eq!(h.session.prompt().map(|p| p.line()), Some("Line: ".to_string()));
    h.type_text("2").press("RET");
    assert_eq!(h.cursor(), Position::new(1, 0));
}

#[test]
fn buffer_commands_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    std::fs::write(&a, "alpha\n").unwrap();
    std::fs::write(&b, "beta\n").unwrap();

    let mut h = Harness::new(&[]);
    h.press("C-k n");
    assert_eq!(h.status(), Some("No other buffers."));

    h.press("C-k e").type_text(a.to_str().unwrap()).press("RET");
    assert_eq!(h.state.buffers.len(), 1, "scratch document is reused");
    h.press("C-k e").type_text(b.to_str().unwrap()).press("RET");
    assert_eq!(h.state.buffers.len(), 2);
    assert_eq!(h.lines(), vec!["beta"]);

    h.press("C-k p");
    assert!(h.last.buffer_replaced);
    assert_eq!(h.status(), Some("Switched to buffer 0: a.txt"));

    h.press("C-k b").type_text("b").press("TAB");
    assert_eq!(h.session.prompt().map(|p| p.input().to_string()), Some("b.txt".into()));
    h.press("RET");
    assert_eq!(h.state.buffers.current_index(), 1);

    h.press("C-k c");
    assert_eq!(h.status(), Some("Closed buffer. Now on a.txt"));
    assert_eq!(h.state.buffers.len(), 1);
}

#[test]
fn opening_over_unsaved_work_asks_first() {
    let mut h = Harness::new(&[]);
    h.type_text("x").press("C-k e");
    assert!(h.session.prompt().is_none());
    assert_eq!(
        h.status(),
        Some("File not saved - C-k e again to open a new file anyways.")
    );
    h.press("C-k e");
    assert!(h.session.prompt().is_some());
}

#[test]
fn saving_unnamed_document_prompts_for_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.txt");
    let mut h = Harness::new(&[]);
    h.type_text("hi").press("C-k s");
    assert_eq!(h.session.prompt().map(|p| p.label().to_string()), Some("Filename: ".into()));
    h.type_text(path.to_str().unwrap()).press("RET");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi\n");
    assert!(!h.state.current_doc().dirty);
    assert_eq!(
        h.status(),
        Some(format!("Wrote 3 bytes to {}.", path.display()).as_str())
    );
    h.press("C-k s");
    assert_eq!(h.status(), Some("No changes to save."));
}

#[test]
fn save_and_quit_on_unnamed_waits_for_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("q.txt");
    let mut h = Harness::new(&[]);
    h.type_text("z").press("C-k x");
    assert!(!h.last.quit);
    h.type_text(path.to_str().unwrap()).press("RET");
    assert!(h.last.quit);
}

#[test]
fn cancelled_save_reports() {
    let mut h = Harness::new(&[]);
    h.type_text("z").press("C-k s C-g");
    assert_eq!(h.status(), Some("Save aborted."));
    assert!(h.state.current_doc().dirty);
}

#[test]
fn jump_to_mark_swaps() {
    let mut h = Harness::new(&["hello world"]);
    h.press("C-k SPC END C-k C-SPC");
    assert_eq!(h.cursor(), Position::new(0, 0));
    assert_eq!(h.state.current_doc().mark(), Some(Position::new(0, 11)));
    assert_eq!(h.status(), Some("Jumped to mark"));
}
