//! Dispatcher applying keys to mutable editor state.
//!
//! A key either feeds the open prompt or goes through the mode machine to
//! become a [`Command`]. Commands are routed to focused sub-modules:
//! * `motion`  - cursor movement
//! * `edit`    - text and region mutation, kill ring
//! * `undo`    - undo / redo
//! * `command` - buffers, files, prompts and quitting
//!
//! After every key the current document is scrolled so the cursor is
//! visible and the render forms of the visible rows are brought up to date.

use std::rc::Rc;

use core_events::KeyCode;
use core_state::{EditError, EditorState};

use crate::mode::{InputMode, transition};
use crate::prompt::{DirectoryLister, FsLister, Prompt, PromptAction, PromptStep};
use crate::Command;

mod command;
mod edit;
mod motion;
mod undo;

/// Result of dispatching a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// The current document changed identity or content wholesale (buffer
    /// switch, file load, `C-l`). The renderer repaints every row.
    pub buffer_replaced: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            buffer_replaced: false,
        }
    }
    pub fn buffer_replaced() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: true,
        }
    }
}

/// Per-terminal interaction state: the current input mode, the open prompt,
/// and the unsaved-changes confirmation.
pub struct Session {
    mode: InputMode,
    prompt: Option<Prompt>,
    /// Armed: the next discard of unsaved work only warns. Every command that
    /// is not such a discard re-arms it.
    confirm_armed: bool,
    lister: Rc<dyn DirectoryLister>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode)
            .field("prompt", &self.prompt)
            .field("confirm_armed", &self.confirm_armed)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_lister(Rc::new(FsLister))
    }

    pub fn with_lister(lister: Rc<dyn DirectoryLister>) -> Self {
        Self {
            mode: InputMode::Normal,
            prompt: None,
            confirm_armed: true,
            lister,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub(crate) fn open_prompt(&mut self, prompt: Prompt) {
        tracing::debug!(target: "actions.prompt", label = prompt.label(), "open");
        self.prompt = Some(prompt);
    }

    pub(crate) fn lister(&self) -> Rc<dyn DirectoryLister> {
        Rc::clone(&self.lister)
    }

    /// Returns true when a discard should proceed. The first attempt while
    /// `dirty` only disarms and reports `warning`.
    pub(crate) fn confirm_discard(
        &mut self,
        armed: bool,
        dirty: bool,
        state: &mut EditorState,
        warning: &str,
    ) -> bool {
        if dirty && armed {
            self.confirm_armed = false;
            state.set_status(warning);
            return false;
        }
        true
    }
}

/// Apply one key. Errors from the state layer become status messages.
pub fn dispatch(key: KeyCode, session: &mut Session, state: &mut EditorState) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", key = %key, mode = ?session.mode, prompt = session.prompt.is_some(), "key");
    let result = match session.prompt.as_mut() {
        Some(prompt) => match prompt.handle_key(key, state) {
            PromptStep::Continue => DispatchResult::dirty(),
            PromptStep::Closed(action) => {
                session.prompt = None;
                match action {
                    PromptAction::Done => DispatchResult::dirty(),
                    PromptAction::Quit => DispatchResult::quit(),
                }
            }
        },
        None => {
            let (next, cmd) = transition(session.mode, key, state.repeat.is_active());
            session.mode = next;
            match apply(cmd, session, state) {
                Ok(r) => r,
                Err(err) => {
                    tracing::debug!(target: "actions.dispatch", ?cmd, %err, "command_failed");
                    state.set_status(err.to_string());
                    DispatchResult::dirty()
                }
            }
        }
    };
    settle(state);
    result
}

fn apply(
    cmd: Command,
    session: &mut Session,
    state: &mut EditorState,
) -> Result<DispatchResult, EditError> {
    match cmd {
        Command::RepeatStart | Command::RepeatDigit(_) => {
            let clamped = match cmd {
                Command::RepeatDigit(d) => state.repeat.digit(d),
                _ => state.repeat.start(),
            };
            let n = state.repeat.count();
            if clamped {
                state.set_status(format!("C-u {n} (maximum)"));
            } else {
                state.set_status(format!("C-u {n}"));
            }
            return Ok(DispatchResult::dirty());
        }
        // A prefix key keeps the count for the command it introduces.
        Command::None if session.mode != InputMode::Normal => return Ok(DispatchResult::clean()),
        _ => {}
    }

    let count = state.repeat.take();
    let armed = std::mem::replace(&mut session.confirm_armed, true);
    if cmd.breaks_kill_chain() {
        state.kill_ring.break_chain();
    }
    tracing::trace!(target: "actions.dispatch", ?cmd, count, "apply");

    match cmd {
        Command::None => Ok(DispatchResult::clean()),
        Command::Move(_)
        | Command::PrevWord
        | Command::NextWord
        | Command::DocumentStart
        | Command::DocumentEnd => Ok(motion::handle_motion(cmd, count, state)),
        Command::Undo => undo::handle_undo(count, state),
        Command::Redo => undo::handle_redo(count, state),
        Command::Insert(_)
        | Command::Newline
        | Command::DeleteBackward
        | Command::DeleteForward
        | Command::DeleteToLineStart
        | Command::DeleteNextWord
        | Command::DeletePrevWord
        | Command::KillLine
        | Command::KillRows
        | Command::Yank
        | Command::FlushKillRing
        | Command::ToggleMark
        | Command::JumpToMark
        | Command::SwapMark
        | Command::CutRegion
        | Command::CopyRegion
        | Command::IndentRegion
        | Command::UnindentRegion
        | Command::Reflow => edit::handle_edit(cmd, count, state),
        _ => command::handle_command(cmd, armed, session, state),
    }
}

/// Keep the cursor on screen and the visible rows rendered.
pub fn settle(state: &mut EditorState) {
    let rows = state.text_rows();
    let cols = state.screen_cols;
    let doc = state.current_doc_mut();
    doc.scroll(rows, cols);
    let top = doc.viewport.row_offset;
    doc.refresh_render(top..top + rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::Document;
    use core_text::Position;
    use pretty_assertions::assert_eq;

    fn run(keys: &[KeyCode], session: &mut Session, state: &mut EditorState) -> DispatchResult {
        let mut last = DispatchResult::clean();
        for &k in keys {
            last = dispatch(k, session, state);
        }
        last
    }

    fn text(s: &str) -> Vec<KeyCode> {
        s.bytes().map(KeyCode::Char).collect()
    }

    #[test]
    fn repeat_argument_applies_to_one_command() {
        let mut s = Session::new();
        let mut st = EditorState::default();
        run(&[KeyCode::Ctrl(b'u'), KeyCode::Char(b'3')], &mut s, &mut st);
        assert_eq!(st.status_text(), Some("C-u 3"));
        run(&text("ab"), &mut s, &mut st);
        assert_eq!(st.current_doc().lines(), vec!["aaab"]);
        assert!(!st.repeat.is_active());
    }

    #[test]
    fn repeat_argument_stops_at_maximum() {
        let mut s = Session::new();
        let mut st = EditorState::default();
        run(&[KeyCode::Ctrl(b'u')], &mut s, &mut st);
        run(&text("9999"), &mut s, &mut st);
        assert_eq!(st.status_text(), Some("C-u 9999"));
        run(&text("99999999999999999999999"), &mut s, &mut st);
        assert_eq!(st.status_text(), Some("C-u 10000 (maximum)"));
        assert_eq!(st.repeat.count(), core_state::MAX_REPEAT);
    }

    #[test]
    fn repeat_argument_survives_prefix_key() {
        let mut s = Session::new();
        let mut st = EditorState::default();
        *st.current_doc_mut() = Document::from_lines([b"a b c d".to_vec()]);
        run(
            &[KeyCode::Ctrl(b'u'), KeyCode::Char(b'2'), KeyCode::Esc, KeyCode::Char(b'f')],
            &mut s,
            &mut st,
        );
        assert_eq!(s.mode(), InputMode::Normal);
        assert_eq!(st.current_doc().cursor(), Position::new(0, 3));
    }

    #[test]
    fn errors_become_status() {
        let mut s = Session::new();
        let mut st = EditorState::default();
        let r = run(&[KeyCode::Ctrl(b'w')], &mut s, &mut st);
        assert!(r.dirty);
        assert_eq!(st.status_text(), Some("Mark not set."));
    }

    #[test]
    fn viewport_follows_cursor() {
        let mut s = Session::new();
        let mut st = EditorState::default();
        st.resize(80, 12);
        *st.current_doc_mut() = Document::from_lines((0..50).map(|i| format!("{i}").into_bytes()));
        run(&[KeyCode::Esc, KeyCode::Char(b'>')], &mut s, &mut st);
        let doc = st.current_doc();
        assert!(doc.viewport.row_offset + st.text_rows() > doc.cursor().row);
        assert!(!doc.row(doc.cursor().row.min(49)).unwrap().is_render_dirty());
    }

    #[test]
    fn unknown_key_reports() {
        let mut s = Session::new();
        let mut st = EditorState::default();
        run(&[KeyCode::Ctrl(b'k'), KeyCode::Char(b'Z')], &mut s, &mut st);
        assert_eq!(st.status_text(), Some("unknown kcommand 'Z'"));
        assert_eq!(s.mode(), InputMode::Normal);
    }
}
