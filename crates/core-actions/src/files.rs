//! File commands shared by the dispatcher and the prompts. Failures end up on
//! the status line rather than propagating.

use core_state::{Document, EditorState};

use crate::io_ops::{self, LoadOutcome, SaveOutcome};

/// Load `path` into the editor. The initial scratch document is reused when
/// it is the only one and untouched; otherwise a new document is added and
/// made current.
pub fn open_file(state: &mut EditorState, path: &str) {
    let reuse = state.buffers.len() == 1 && state.current_doc().is_unnamed_and_empty();
    if !reuse {
        let index = state.add_document(Document::new());
        state.buffers.switch(index);
    }
    match io_ops::load(state.current_doc_mut(), path) {
        Ok(LoadOutcome::NewFile) => state.set_status("[new file]"),
        Ok(LoadOutcome::Loaded { rows }) => {
            tracing::debug!(target: "actions.dispatch", path, rows, "opened");
        }
        Err(err) => state.set_status(format!("Error reading {path}: {}", err.root_cause())),
    }
}

/// Write the current document. Returns whether the document is now clean.
pub fn save_current(state: &mut EditorState) -> bool {
    let path = state.current_doc().display_name().to_string();
    match io_ops::save(state.current_doc_mut()) {
        Ok(SaveOutcome::Written { bytes }) => {
            let full = state.current_doc().path.clone().unwrap_or(path);
            state.set_status(format!("Wrote {bytes} bytes to {full}."));
            true
        }
        Ok(SaveOutcome::Unchanged) => {
            state.set_status("No changes to save.");
            true
        }
        Err(err) => {
            state.set_status(format!("Error writing {path}: {}", err.root_cause()));
            false
        }
    }
}

/// Re-read the current document from disk and return to the same place.
pub fn reload_current(state: &mut EditorState) {
    let Some(path) = state.current_doc().path.clone() else {
        state.set_status("Buffer has no file to reload.");
        return;
    };
    let at = state.current_doc().cursor();
    match io_ops::load(state.current_doc_mut(), &path) {
        Ok(_) => {
            state.current_doc_mut().jump_to_position(at.col, at.row);
            state.set_status("file reloaded");
        }
        Err(err) => state.set_status(format!("Error reading {path}: {}", err.root_cause())),
    }
}
