//! Key handling for the editor: the input mode machine, the commands it
//! produces, prompts, and the dispatcher that applies commands to
//! [`core_state::EditorState`].
//!
//! The runtime feeds decoded [`core_events::KeyCode`]s to [`dispatch`] one at
//! a time. Everything here is synchronous; the only side effects outside the
//! state are file reads and writes in [`io_ops`].

pub mod dispatcher;
pub mod files;
pub mod io_ops;
pub mod mode;
pub mod prompt;

pub use dispatcher::{DispatchResult, Session, dispatch, settle};
pub use mode::{InputMode, transition, unknown_key_message};
pub use prompt::{DirectoryLister, FsLister, Prompt};

use core_events::KeyCode;
use core_state::Direction;

/// One editor command, as chosen by [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Nothing to do (prefix keys, `C-g`).
    None,
    RepeatStart,
    RepeatDigit(u8),

    // Editing
    Insert(u8),
    Newline,
    DeleteBackward,
    DeleteForward,
    DeleteToLineStart,
    DeleteNextWord,
    DeletePrevWord,
    KillLine,
    KillRows,
    Yank,
    FlushKillRing,
    Undo,
    Redo,

    // Region
    ToggleMark,
    JumpToMark,
    SwapMark,
    CutRegion,
    CopyRegion,
    IndentRegion,
    UnindentRegion,
    Reflow,

    // Motion
    Move(Direction),
    PrevWord,
    NextWord,
    DocumentStart,
    DocumentEnd,

    // Prompts
    Search,
    GotoLine,
    SwitchBuffer,
    OpenFile,

    // Buffers and files
    NextBuffer,
    PrevBuffer,
    CloseBuffer,
    Save,
    SaveAndQuit,
    Reload,
    Quit,
    ForceQuit,

    Refresh,
    Unknown(InputMode, KeyCode),
}

impl Command {
    /// Commands that reposition the cursor without editing. These end any kill
    /// chain in progress.
    pub fn breaks_kill_chain(&self) -> bool {
        matches!(
            self,
            Command::Move(_)
                | Command::PrevWord
                | Command::NextWord
                | Command::DocumentStart
                | Command::DocumentEnd
                | Command::JumpToMark
                | Command::SwapMark
                | Command::Search
                | Command::GotoLine
        )
    }
}
