#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, Session, dispatch};
use core_events::KeyCode;
use core_state::{Document, EditorState};
use core_text::Position;

/// Decode one key name: `C-x`, `C-SPC`, `ESC`, `RET`, `TAB`, `BS`, `DEL`,
/// `SPC`, arrow names, or a single printable character.
pub fn key(name: &str) -> KeyCode {
    match name {
        "ESC" => KeyCode::Esc,
        "RET" => KeyCode::Enter,
        "TAB" => KeyCode::Tab,
        "BS" => KeyCode::Backspace,
        "DEL" => KeyCode::Delete,
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "PGUP" => KeyCode::PageUp,
        "PGDN" => KeyCode::PageDown,
        "SPC" => KeyCode::Char(b' '),
        "C-SPC" => KeyCode::Ctrl(b' '),
        other => match other.as_bytes() {
            [b'C', b'-', c] => KeyCode::Ctrl(c.to_ascii_lowercase()),
            [c] => KeyCode::Char(*c),
            _ => panic!("bad key name {other:?}"),
        },
    }
}

pub struct Harness {
    pub session: Session,
    pub state: EditorState,
    pub last: DispatchResult,
}

impl Harness {
    pub fn new(lines: &[&str]) -> Self {
        let mut state = EditorState::default();
        if !lines.is_empty() {
            *state.current_doc_mut() =
                Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()));
        }
        Self {
            session: Session::new(),
            state,
            last: DispatchResult::clean(),
        }
    }

    /// Press space-separated keys, e.g. `"C-k SPC C-n C-w"`.
    pub fn press(&mut self, keys: &str) -> &mut Self {
        for name in keys.split_whitespace() {
            self.last = dispatch(key(name), &mut self.session, &mut self.state);
        }
        self
    }

    /// Type literal text, one byte per key.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for b in text.bytes() {
            let k = match b {
                b'\n' => KeyCode::Enter,
                b'\t' => KeyCode::Tab,
                _ => KeyCode::Char(b),
            };
            self.last = dispatch(k, &mut self.session, &mut self.state);
        }
        self
    }

    pub fn at(&mut self, row: usize, col: usize) -> &mut Self {
        self.state.current_doc_mut().set_cursor(Position::new(row, col));
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.current_doc().lines()
    }

    pub fn cursor(&self) -> Position {
        self.state.current_doc().cursor()
    }

    pub fn status(&self) -> Option<&str> {
        self.state.status_text()
    }

    pub fn kill(&self) -> Option<String> {
        self.state
            .kill_ring
            .content()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}
