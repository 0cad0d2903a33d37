//! Single-line prompt driver.
//!
//! A [`Prompt`] owns the text typed so far and a [`PromptHandler`] that gives
//! the prompt its meaning. The driver applies the editing keys itself and then
//! hands every key to the handler, which may rewrite the input in place (TAB
//! completion) or act on the document as the user types (incremental search).

mod handlers;
mod path;

pub use handlers::{GotoLinePrompt, OpenFilePrompt, SaveAsPrompt, SearchPrompt, SwitchBufferPrompt};
pub use path::{DirEntryInfo, DirectoryLister, FsLister, MAX_DIR_ENTRIES, complete_path};

use core_events::KeyCode;
use core_state::EditorState;

/// What closing a prompt asks of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Done,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStep {
    Continue,
    Closed(PromptAction),
}

pub trait PromptHandler {
    /// Text shown before the input, e.g. `"Line: "`.
    fn label(&self) -> &str;

    /// Runs after the driver has applied `key` to `input`. TAB reaches here
    /// without having been inserted.
    fn on_key(&mut self, _input: &mut String, _key: KeyCode, _state: &mut EditorState) {}

    /// ENTER on a non-empty input.
    fn on_submit(&mut self, input: &str, state: &mut EditorState) -> PromptAction;

    /// ESC or C-g.
    fn on_cancel(&mut self, _state: &mut EditorState) {}
}

pub struct Prompt {
    input: String,
    handler: Box<dyn PromptHandler>,
}

impl std::fmt::Debug for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompt")
            .field("label", &self.handler.label())
            .field("input", &self.input)
            .finish()
    }
}

impl Prompt {
    pub fn new(handler: impl PromptHandler + 'static) -> Self {
        Self {
            input: String::new(),
            handler: Box::new(handler),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn label(&self) -> &str {
        self.handler.label()
    }

    /// The message line while the prompt is open.
    pub fn line(&self) -> String {
        format!("{}{}", self.handler.label(), self.input)
    }

    pub fn handle_key(&mut self, key: KeyCode, state: &mut EditorState) -> PromptStep {
        state.clear_status();
        match key {
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Ctrl(b'h') => {
                self.input.pop();
            }
            KeyCode::Esc | KeyCode::Ctrl(b'g') => {
                tracing::debug!(target: "actions.prompt", label = self.handler.label(), "cancel");
                self.handler.on_cancel(state);
                return PromptStep::Closed(PromptAction::Done);
            }
            KeyCode::Enter => {
                if self.input.is_empty() {
                    return PromptStep::Continue;
                }
                tracing::debug!(target: "actions.prompt", label = self.handler.label(), len = self.input.len(), "submit");
                let action = self.handler.on_submit(&self.input, state);
                return PromptStep::Closed(action);
            }
            KeyCode::Char(b) if (0x20..0x7f).contains(&b) => self.input.push(b as char),
            _ => {}
        }
        self.handler.on_key(&mut self.input, key, state);
        PromptStep::Continue
    }
}
