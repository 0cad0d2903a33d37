use std::rc::Rc;

use core_events::KeyCode;
use core_state::{Document, EditorState, EditError, Search, SearchDirection};

use super::path::{DirectoryLister, complete_path};
use super::{PromptAction, PromptHandler};
use crate::files;

/// Incremental search over the current document.
#[derive(Debug)]
pub struct SearchPrompt {
    search: Search,
}

impl SearchPrompt {
    pub fn new(doc: &Document) -> Self {
        Self {
            search: Search::begin(doc),
        }
    }
}

fn search_step(key: KeyCode) -> Option<SearchDirection> {
    match key {
        KeyCode::Ctrl(b's') | KeyCode::Down | KeyCode::Right => Some(SearchDirection::Forward),
        KeyCode::Ctrl(b'r') | KeyCode::Up | KeyCode::Left => Some(SearchDirection::Backward),
        _ => None,
    }
}

impl PromptHandler for SearchPrompt {
    fn label(&self) -> &str {
        "Search (ESC to cancel): "
    }

    fn on_key(&mut self, input: &mut String, key: KeyCode, state: &mut EditorState) {
        let step = search_step(key);
        let edited = matches!(
            key,
            KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete | KeyCode::Ctrl(b'h')
        );
        if step.is_none() && !edited {
            return;
        }
        let rows = state.text_rows();
        if let Err(err) = self.search.update(state.current_doc_mut(), input, step, rows) {
            state.set_status(err.to_string());
        }
    }

    fn on_submit(&mut self, _input: &str, state: &mut EditorState) -> PromptAction {
        if self.search.last_match().is_none() {
            self.search.restore(state.current_doc_mut());
        }
        PromptAction::Done
    }

    fn on_cancel(&mut self, state: &mut EditorState) {
        self.search.restore(state.current_doc_mut());
    }
}

#[derive(Debug, Default)]
pub struct GotoLinePrompt;

impl PromptHandler for GotoLinePrompt {
    fn label(&self) -> &str {
        "Line: "
    }

    fn on_submit(&mut self, input: &str, state: &mut EditorState) -> PromptAction {
        match input.trim().parse::<usize>() {
            Ok(n) => {
                state.kill_ring.break_chain();
                let rows = state.text_rows();
                let doc = state.current_doc_mut();
                doc.goto_line(n);
                doc.recenter(rows);
            }
            Err(_) => state.set_status(EditError::InvalidLineNumber(input.to_string()).to_string()),
        }
        PromptAction::Done
    }
}

#[derive(Debug, Default)]
pub struct SwitchBufferPrompt;

impl PromptHandler for SwitchBufferPrompt {
    fn label(&self) -> &str {
        "Switch to buffer: "
    }

    fn on_key(&mut self, input: &mut String, key: KeyCode, state: &mut EditorState) {
        if key != KeyCode::Tab {
            return;
        }
        match state.buffers.complete(input, state.settings.completion_width) {
            Ok(c) => {
                if let Some(r) = c.replacement {
                    *input = r;
                }
                state.set_status(c.message);
            }
            Err(EditError::NoCompletions(_)) => state.set_status("No matches"),
            Err(err) => state.set_status(err.to_string()),
        }
    }

    fn on_submit(&mut self, input: &str, state: &mut EditorState) -> PromptAction {
        match state.buffers.switch_by_name(input) {
            Ok(i) => {
                let msg = format!("Switched to buffer {i}: {}", state.current_doc().display_name());
                state.set_status(msg);
            }
            Err(err) => state.set_status(err.to_string()),
        }
        PromptAction::Done
    }
}

pub struct OpenFilePrompt {
    lister: Rc<dyn DirectoryLister>,
}

impl std::fmt::Debug for OpenFilePrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenFilePrompt").finish_non_exhaustive()
    }
}

impl OpenFilePrompt {
    pub fn new(lister: Rc<dyn DirectoryLister>) -> Self {
        Self { lister }
    }
}

impl PromptHandler for OpenFilePrompt {
    fn label(&self) -> &str {
        "Load file: "
    }

    fn on_key(&mut self, input: &mut String, key: KeyCode, state: &mut EditorState) {
        if key != KeyCode::Tab {
            return;
        }
        let c = complete_path(self.lister.as_ref(), input, state.settings.completion_width);
        if let Some(r) = c.replacement {
            *input = r;
        }
        state.set_status(c.message);
    }

    fn on_submit(&mut self, input: &str, state: &mut EditorState) -> PromptAction {
        files::open_file(state, input);
        PromptAction::Done
    }
}

/// Names an unnamed document, then writes it.
#[derive(Debug, Default)]
pub struct SaveAsPrompt {
    quit_after: bool,
}

impl SaveAsPrompt {
    pub fn new(quit_after: bool) -> Self {
        Self { quit_after }
    }
}

impl PromptHandler for SaveAsPrompt {
    fn label(&self) -> &str {
        "Filename: "
    }

    fn on_submit(&mut self, input: &str, state: &mut EditorState) -> PromptAction {
        state.current_doc_mut().path = Some(input.to_string());
        if files::save_current(state) && self.quit_after {
            PromptAction::Quit
        } else {
            PromptAction::Done
        }
    }

    fn on_cancel(&mut self, state: &mut EditorState) {
        state.set_status("Save aborted.");
    }
}
