//! Text mutation: inserts, deletes, kills, yanks and region commands.
//!
//! Character deletes feed the kill ring in the direction they travel
//! (backward deletes prepend, forward deletes append), so a run of deletes
//! uninterrupted by motion yanks back as one piece.

use super::DispatchResult;
use crate::Command;
use core_state::{EditError, EditorState, KillMode};

pub(crate) fn handle_edit(
    cmd: Command,
    count: usize,
    state: &mut EditorState,
) -> Result<DispatchResult, EditError> {
    let margin = state.settings.reflow_margin;
    let (doc, kill) = state.doc_and_kill();
    let before = doc.cursor();
    let mut status: Option<String> = None;
    match cmd {
        Command::Insert(b) => {
            for _ in 0..count {
                doc.insert_char(b, kill);
            }
        }
        Command::Newline => {
            for _ in 0..count {
                doc.newline(kill);
            }
        }
        Command::DeleteBackward => {
            for _ in 0..count {
                doc.delete_char(KillMode::Prepend, kill);
            }
        }
        Command::DeleteForward => {
            for _ in 0..count {
                doc.delete_forward(KillMode::Append, kill);
            }
        }
        Command::DeleteToLineStart => doc.delete_to_line_start(kill),
        Command::DeleteNextWord => {
            for _ in 0..count {
                doc.delete_next_word(kill);
            }
        }
        Command::DeletePrevWord => {
            for _ in 0..count {
                doc.delete_prev_word(kill);
            }
        }
        Command::KillLine => doc.kill_line(count, kill),
        Command::KillRows => {
            for _ in 0..count {
                let row = doc.cursor().row;
                if !doc.delete_row(row, kill) {
                    break;
                }
            }
        }
        Command::Yank => {
            for _ in 0..count {
                doc.yank(kill)?;
            }
        }
        Command::FlushKillRing => {
            if kill.is_empty() {
                return Err(EditError::EmptyKillRing);
            }
            let n = kill.flush();
            status = Some(format!("Kill ring cleared ({n} characters)"));
        }
        Command::ToggleMark => {
            let set = doc.toggle_mark();
            status = Some(if set { "Mark set." } else { "Mark cleared." }.to_string());
        }
        Command::JumpToMark => {
            doc.swap_mark()?;
            status = Some("Jumped to mark".to_string());
        }
        Command::SwapMark => {
            doc.swap_mark()?;
            status = Some("Jumped to mark; mark is now the previous location.".to_string());
        }
        Command::CutRegion => {
            doc.kill_region(kill)?;
            doc.delete_region(kill)?;
            doc.set_mark(None);
        }
        Command::CopyRegion => {
            let n = doc.kill_region(kill)?;
            doc.set_mark(None);
            status = Some(format!("Copied {n} bytes"));
        }
        Command::IndentRegion => doc.indent_region()?,
        Command::UnindentRegion => {
            doc.unindent_region()?;
            status = Some("Region unindented".to_string());
        }
        Command::Reflow => {
            doc.reflow_region(margin)?;
            status = Some(format!("Reflowed to {margin} columns"));
        }
        _ => return Ok(DispatchResult::clean()),
    }
    let after = doc.cursor();
    tracing::trace!(target: "actions.dispatch", op = ?cmd, count, line = before.row, col = before.col, to_line = after.row, to_col = after.col, "edit");
    if let Some(msg) = status {
        state.set_status(msg);
    }
    Ok(DispatchResult::dirty())
}
