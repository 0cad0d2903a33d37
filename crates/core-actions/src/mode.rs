//! Input mode machine.
//!
//! `Normal` handles ordinary keys. `C-k` enters `KCommand` and `ESC` enters
//! `Escape`; both run exactly one command on the next key and return to
//! `Normal`. [`transition`] is pure: it maps a mode and a key to the next mode
//! and the command to apply, and knows nothing about where keys come from.

use core_events::KeyCode;
use core_state::Direction;

use crate::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    KCommand,
    Escape,
}

impl InputMode {
    /// Letter shown at the start of the status bar.
    pub fn indicator(self) -> char {
        match self {
            InputMode::Normal => 'N',
            InputMode::KCommand => 'K',
            InputMode::Escape => 'E',
        }
    }
}

/// Decide the next mode and command for `key`. `repeat_active` tells whether
/// a `C-u` argument is being collected, which turns digits into count input.
pub fn transition(mode: InputMode, key: KeyCode, repeat_active: bool) -> (InputMode, Command) {
    match mode {
        InputMode::Normal => normal(key, repeat_active),
        InputMode::KCommand => (InputMode::Normal, kcommand(key)),
        InputMode::Escape => (InputMode::Normal, escape(key)),
    }
}

fn motion(key: KeyCode) -> Option<Direction> {
    let dir = match key {
        KeyCode::Up | KeyCode::Ctrl(b'p') => Direction::Up,
        KeyCode::Down | KeyCode::Ctrl(b'n') => Direction::Down,
        KeyCode::Right | KeyCode::Ctrl(b'f') => Direction::Right,
        KeyCode::Left | KeyCode::Ctrl(b'b') => Direction::Left,
        KeyCode::Home | KeyCode::Ctrl(b'a') => Direction::Home,
        KeyCode::End | KeyCode::Ctrl(b'e') => Direction::End,
        KeyCode::PageUp => Direction::PageUp,
        KeyCode::PageDown => Direction::PageDown,
        _ => return None,
    };
    Some(dir)
}

fn normal(key: KeyCode, repeat_active: bool) -> (InputMode, Command) {
    if let Some(dir) = motion(key) {
        return (InputMode::Normal, Command::Move(dir));
    }
    let cmd = match key {
        KeyCode::Ctrl(b'u') => Command::RepeatStart,
        KeyCode::Char(d @ b'0'..=b'9') if repeat_active => Command::RepeatDigit(d - b'0'),
        KeyCode::Ctrl(b'k') => return (InputMode::KCommand, Command::None),
        KeyCode::Esc => return (InputMode::Escape, Command::None),
        KeyCode::Enter => Command::Newline,
        KeyCode::Backspace | KeyCode::Ctrl(b'h') => Command::DeleteBackward,
        KeyCode::Delete | KeyCode::Ctrl(b'd') => Command::DeleteForward,
        KeyCode::Ctrl(b'g') => Command::None,
        KeyCode::Ctrl(b'l') => Command::Refresh,
        KeyCode::Ctrl(b's') => Command::Search,
        KeyCode::Ctrl(b'w') => Command::CutRegion,
        KeyCode::Ctrl(b'y') => Command::Yank,
        other => match other.insertable() {
            Some(b) => Command::Insert(b),
            None => Command::Unknown(InputMode::Normal, other),
        },
    };
    (InputMode::Normal, cmd)
}

fn kcommand(key: KeyCode) -> Command {
    match key {
        KeyCode::Backspace => Command::DeleteToLineStart,
        KeyCode::Char(b'=') => Command::IndentRegion,
        KeyCode::Char(b'-') => Command::UnindentRegion,
        KeyCode::Char(b' ') => Command::ToggleMark,
        KeyCode::Ctrl(b' ') => Command::JumpToMark,
        KeyCode::Char(b'c') => Command::CloseBuffer,
        KeyCode::Char(b'd') => Command::KillLine,
        KeyCode::Delete | KeyCode::Ctrl(b'd') => Command::KillRows,
        KeyCode::Char(b'e') | KeyCode::Ctrl(b'e') => Command::OpenFile,
        KeyCode::Char(b'f') => Command::FlushKillRing,
        KeyCode::Char(b'n') => Command::NextBuffer,
        KeyCode::Char(b'p') => Command::PrevBuffer,
        KeyCode::Char(b'b') => Command::SwitchBuffer,
        KeyCode::Char(b'g') => Command::GotoLine,
        KeyCode::Char(b'j') => Command::SwapMark,
        KeyCode::Char(b'q') => Command::Quit,
        KeyCode::Ctrl(b'q') => Command::ForceQuit,
        KeyCode::Ctrl(b'r') => Command::Reload,
        KeyCode::Char(b's') | KeyCode::Ctrl(b's') => Command::Save,
        KeyCode::Char(b'x') | KeyCode::Ctrl(b'x') => Command::SaveAndQuit,
        KeyCode::Char(b'u') => Command::Undo,
        KeyCode::Char(b'U') => Command::Redo,
        KeyCode::Char(b'y') => Command::Yank,
        KeyCode::Esc | KeyCode::Ctrl(b'g') => Command::None,
        other => Command::Unknown(InputMode::KCommand, other),
    }
}

fn escape(key: KeyCode) -> Command {
    match key {
        KeyCode::Char(b'>') => Command::DocumentEnd,
        KeyCode::Char(b'<') => Command::DocumentStart,
        KeyCode::Char(b'b') => Command::PrevWord,
        KeyCode::Char(b'f') => Command::NextWord,
        KeyCode::Char(b'd') => Command::DeleteNextWord,
        KeyCode::Backspace => Command::DeletePrevWord,
        KeyCode::Char(b'm') => Command::ToggleMark,
        KeyCode::Char(b'w') => Command::CopyRegion,
        KeyCode::Char(b'q') => Command::Reflow,
        KeyCode::Esc | KeyCode::Ctrl(b'g') => Command::None,
        other => Command::Unknown(InputMode::Escape, other),
    }
}

/// Status text for a key no mode binds.
pub fn unknown_key_message(mode: InputMode, key: KeyCode) -> String {
    let raw = key.to_raw();
    match mode {
        InputMode::KCommand => match key {
            KeyCode::Char(b) if b.is_ascii_graphic() => format!("unknown kcommand '{}'", b as char),
            _ => format!("unknown kcommand: {raw:04x}"),
        },
        InputMode::Escape => format!("unknown ESC key: {raw:04x}"),
        InputMode::Normal => format!("unknown key: {raw:04x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(c: u8) -> KeyCode {
        KeyCode::Char(c)
    }

    #[test]
    fn indicators() {
        assert_eq!(InputMode::Normal.indicator(), 'N');
        assert_eq!(InputMode::KCommand.indicator(), 'K');
        assert_eq!(InputMode::Escape.indicator(), 'E');
    }

    #[test]
    fn prefixes_enter_and_leave_submodes() {
        assert_eq!(
            transition(InputMode::Normal, KeyCode::Ctrl(b'k'), false),
            (InputMode::KCommand, Command::None)
        );
        assert_eq!(
            transition(InputMode::KCommand, ch(b'u'), false),
            (InputMode::Normal, Command::Undo)
        );
        assert_eq!(
            transition(InputMode::Normal, KeyCode::Esc, false),
            (InputMode::Escape, Command::None)
        );
        assert_eq!(
            transition(InputMode::Escape, ch(b'f'), false),
            (InputMode::Normal, Command::NextWord)
        );
    }

    #[test]
    fn unknown_keys_return_to_normal() {
        let (mode, cmd) = transition(InputMode::KCommand, ch(b'Z'), false);
        assert_eq!(mode, InputMode::Normal);
        assert_eq!(cmd, Command::Unknown(InputMode::KCommand, ch(b'Z')));
        assert_eq!(
            unknown_key_message(InputMode::KCommand, ch(b'Z')),
            "unknown kcommand 'Z'"
        );
        assert_eq!(
            unknown_key_message(InputMode::KCommand, KeyCode::Ctrl(b'z')),
            "unknown kcommand: 001a"
        );
        let (mode, _) = transition(InputMode::Escape, KeyCode::Up, false);
        assert_eq!(mode, InputMode::Normal);
        assert_eq!(
            unknown_key_message(InputMode::Escape, KeyCode::Up),
            "unknown ESC key: 03ea"
        );
    }

    #[test]
    fn digits_feed_repeat_only_while_active() {
        assert_eq!(
            transition(InputMode::Normal, ch(b'4'), true).1,
            Command::RepeatDigit(4)
        );
        assert_eq!(
            transition(InputMode::Normal, ch(b'4'), false).1,
            Command::Insert(b'4')
        );
        assert_eq!(
            transition(InputMode::Normal, KeyCode::Ctrl(b'u'), false).1,
            Command::RepeatStart
        );
    }

    #[test]
    fn motion_aliases() {
        for (key, dir) in [
            (KeyCode::Ctrl(b'p'), Direction::Up),
            (KeyCode::Ctrl(b'n'), Direction::Down),
            (KeyCode::Ctrl(b'f'), Direction::Right),
            (KeyCode::Ctrl(b'b'), Direction::Left),
            (KeyCode::Ctrl(b'a'), Direction::Home),
            (KeyCode::End, Direction::End),
            (KeyCode::PageDown, Direction::PageDown),
        ] {
            assert_eq!(transition(InputMode::Normal, key, false).1, Command::Move(dir));
        }
    }

    #[test]
    fn insertable_keys() {
        assert_eq!(transition(InputMode::Normal, KeyCode::Tab, false).1, Command::Insert(b'\t'));
        assert_eq!(transition(InputMode::Normal, ch(0xc3), false).1, Command::Insert(0xc3));
        assert_eq!(
            transition(InputMode::Normal, KeyCode::Ctrl(b'o'), false).1,
            Command::Unknown(InputMode::Normal, KeyCode::Ctrl(b'o'))
        );
    }

    #[test]
    fn cancel_keys_are_silent() {
        for mode in [InputMode::KCommand, InputMode::Escape] {
            assert_eq!(transition(mode, KeyCode::Esc, false), (InputMode::Normal, Command::None));
            assert_eq!(
                transition(mode, KeyCode::Ctrl(b'g'), false),
                (InputMode::Normal, Command::None)
            );
        }
    }
}
