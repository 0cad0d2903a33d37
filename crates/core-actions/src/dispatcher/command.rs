//! Buffer, file, prompt and quit commands.

use super::{DispatchResult, Session};
use crate::Command;
use crate::files;
use crate::mode::unknown_key_message;
use crate::prompt::{
    GotoLinePrompt, OpenFilePrompt, Prompt, SaveAsPrompt, SearchPrompt, SwitchBufferPrompt,
};
use core_state::{EditError, EditorState};

pub(crate) fn handle_command(
    cmd: Command,
    armed: bool,
    session: &mut Session,
    state: &mut EditorState,
) -> Result<DispatchResult, EditError> {
    match cmd {
        Command::Search => {
            session.open_prompt(Prompt::new(SearchPrompt::new(state.current_doc())));
            Ok(DispatchResult::dirty())
        }
        Command::GotoLine => {
            session.open_prompt(Prompt::new(GotoLinePrompt));
            Ok(DispatchResult::dirty())
        }
        Command::SwitchBuffer => {
            if state.buffers.len() < 2 {
                return Err(EditError::NoOtherBuffers);
            }
            session.open_prompt(Prompt::new(SwitchBufferPrompt));
            Ok(DispatchResult::dirty())
        }
        Command::OpenFile => {
            let dirty = state.current_doc().dirty;
            if !session.confirm_discard(
                armed,
                dirty,
                state,
                "File not saved - C-k e again to open a new file anyways.",
            ) {
                return Ok(DispatchResult::dirty());
            }
            session.open_prompt(Prompt::new(OpenFilePrompt::new(session.lister())));
            Ok(DispatchResult::dirty())
        }
        Command::NextBuffer | Command::PrevBuffer => {
            if state.buffers.len() < 2 {
                return Err(EditError::NoOtherBuffers);
            }
            if cmd == Command::NextBuffer {
                state.buffers.next();
            } else {
                state.buffers.prev();
            }
            let msg = format!(
                "Switched to buffer {}: {}",
                state.buffers.current_index(),
                state.current_doc().display_name()
            );
            state.set_status(msg);
            Ok(DispatchResult::buffer_replaced())
        }
        Command::CloseBuffer => {
            state.buffers.close_current();
            let msg = format!("Closed buffer. Now on {}", state.current_doc().display_name());
            state.set_status(msg);
            Ok(DispatchResult::buffer_replaced())
        }
        Command::Save => save(session, state, false),
        Command::SaveAndQuit => save(session, state, true),
        Command::Reload => {
            let dirty = state.current_doc().dirty;
            if !session.confirm_discard(armed, dirty, state, "File not saved - C-k C-r again to reload.") {
                return Ok(DispatchResult::dirty());
            }
            files::reload_current(state);
            Ok(DispatchResult::buffer_replaced())
        }
        Command::Quit => {
            let dirty = state.current_doc().dirty;
            if !session.confirm_discard(armed, dirty, state, "File not saved - C-k q again to quit.") {
                return Ok(DispatchResult::dirty());
            }
            tracing::info!(target: "actions.dispatch", "quit");
            Ok(DispatchResult::quit())
        }
        Command::ForceQuit => {
            tracing::info!(target: "actions.dispatch", dirty = state.any_dirty(), "force_quit");
            Ok(DispatchResult::quit())
        }
        Command::Refresh => Ok(DispatchResult::buffer_replaced()),
        Command::Unknown(mode, key) => {
            state.set_status(unknown_key_message(mode, key));
            Ok(DispatchResult::dirty())
        }
        _ => Ok(DispatchResult::clean()),
    }
}

fn save(
    session: &mut Session,
    state: &mut EditorState,
    quit_after: bool,
) -> Result<DispatchResult, EditError> {
    let doc = state.current_doc();
    if doc.dirty && doc.path.is_none() {
        session.open_prompt(Prompt::new(SaveAsPrompt::new(quit_after)));
        return Ok(DispatchResult::dirty());
    }
    let saved = files::save_current(state);
    if quit_after && saved {
        Ok(DispatchResult::quit())
    } else {
        Ok(DispatchResult::dirty())
    }
}
