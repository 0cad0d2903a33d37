//! User-intent failures.
//!
//! None of these are fatal. Operations return them and leave document state
//! unchanged (or restored); the dispatcher turns the `Display` form into the
//! status message.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Mark not set.")]
    NoMark,
    #[error("Failing search: {0}")]
    NoMatch(String),
    #[error("No such buffer: {0}")]
    NoSuchBuffer(String),
    #[error("No other buffers.")]
    NoOtherBuffers,
    #[error("Nothing to undo.")]
    NothingToUndo,
    #[error("Nothing to redo.")]
    NothingToRedo,
    #[error("The kill ring is empty.")]
    EmptyKillRing,
    #[error("No matches for {0:?}")]
    NoCompletions(String),
    #[error("Invalid line number: {0}")]
    InvalidLineNumber(String),
}
