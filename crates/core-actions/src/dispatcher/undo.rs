//! Undo / redo, repeated `count` times. Running out of history after at least
//! one step is not an error.

use super::DispatchResult;
use core_state::{EditError, EditorState};

pub(crate) fn handle_undo(count: usize, state: &mut EditorState) -> Result<DispatchResult, EditError> {
    state.kill_ring.break_chain();
    let doc = state.current_doc_mut();
    let before = doc.row_count();
    for step in 0..count {
        if let Err(err) = doc.undo() {
            if step == 0 {
                return Err(err);
            }
            break;
        }
    }
    let after = doc.row_count();
    tracing::trace!(target: "actions.dispatch", op = "undo", count, buffer_changed = (before != after), "undo");
    Ok(DispatchResult::dirty())
}

pub(crate) fn handle_redo(count: usize, state: &mut EditorState) -> Result<DispatchResult, EditError> {
    state.kill_ring.break_chain();
    let doc = state.current_doc_mut();
    let before = doc.row_count();
    for step in 0..count {
        if let Err(err) = doc.redo() {
            if step == 0 {
                return Err(err);
            }
            break;
        }
    }
    let after = doc.row_count();
    tracing::trace!(target: "actions.dispatch", op = "redo", count, buffer_changed = (before != after), "redo");
    Ok(DispatchResult::dirty())
}
