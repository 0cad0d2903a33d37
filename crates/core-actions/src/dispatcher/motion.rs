//! Cursor movement. Repeated `count` times; the kill chain has already been
//! broken by the caller.

use super::DispatchResult;
use crate::Command;
use core_state::EditorState;

pub(crate) fn handle_motion(cmd: Command, count: usize, state: &mut EditorState) -> DispatchResult {
    let page = state.text_rows();
    let doc = state.current_doc_mut();
    let before = doc.cursor();
    for _ in 0..count {
        match cmd {
            Command::Move(dir) => doc.move_cursor(dir, true, page),
            Command::NextWord => doc.find_next_word(),
            Command::PrevWord => doc.find_prev_word(),
            Command::DocumentStart => doc.move_to_start(),
            Command::DocumentEnd => doc.move_to_end(),
            _ => return DispatchResult::clean(),
        }
    }
    let after = doc.cursor();
    tracing::trace!(target: "actions.dispatch", op = ?cmd, from_row = before.row, from_col = before.col, to_row = after.row, to_col = after.col, "motion");
    if before == after {
        DispatchResult::clean()
    } else {
        DispatchResult::dirty()
    }
}
