//! Terminal backend and crossterm implementation.
//!
//! The editor core never touches the terminal. This crate puts the terminal
//! in raw mode on the alternate screen, translates crossterm key events into
//! the editor's key codes, and runs the input [`core_events::EventSource`].

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;

pub mod input;
pub mod keys;

pub use input::TerminalInputSource;
pub use keys::translate_key;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current size as (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    raw: bool,
}

/// Restores the terminal when dropped, including during unwinding.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter raw mode and return a guard that leaves on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if self.raw {
            return Ok(());
        }
        enable_raw_mode().context("enabling raw mode")?;
        execute!(stdout(), EnterAlternateScreen, Hide).context("entering alternate screen")?;
        self.raw = true;
        tracing::debug!(target: "runtime", "terminal_raw_mode_entered");
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        execute!(stdout(), LeaveAlternateScreen, Show).context("leaving alternate screen")?;
        disable_raw_mode().context("disabling raw mode")?;
        self.raw = false;
        tracing::debug!(target: "runtime", "terminal_restored");
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        terminal::size().context("querying terminal size")
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl TerminalGuard<'_> {
    pub fn backend(&mut self) -> &mut CrosstermBackend {
        self.backend
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.backend.leave() {
            tracing::warn!(target: "runtime", %err, "terminal_restore_failed");
        }
    }
}

/// Leave raw mode without a backend handle. Used from the panic hook, where
/// the guard may not get to run before the message is printed.
pub fn restore_terminal() {
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}
