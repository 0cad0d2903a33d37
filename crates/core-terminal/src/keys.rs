//! crossterm key events to editor key codes.
//!
//! The editor works on bytes, the way a raw terminal delivers them. A
//! multibyte character becomes one `Char` per UTF-8 byte, and Alt arrives as
//! an ESC prefix, which is how the Escape mode commands are reached.

use core_events::KeyCode;
use crossterm::event::{KeyCode as CKeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use smallvec::SmallVec;

pub type Keys = SmallVec<[KeyCode; 4]>;

fn ctrl_key(c: char) -> Option<KeyCode> {
    match c {
        'a'..='z' => Some(KeyCode::Ctrl(c as u8)),
        'A'..='Z' => Some(KeyCode::Ctrl(c.to_ascii_lowercase() as u8)),
        ' ' | '@' | '2' => Some(KeyCode::Ctrl(b' ')),
        '\\' | ']' | '^' | '_' => Some(KeyCode::Ctrl(c as u8)),
        _ => None,
    }
}

/// Translate one crossterm key event. Releases and keys the editor has no
/// code for produce nothing.
pub fn translate_key(event: &KeyEvent) -> Keys {
    let mut out = Keys::new();
    if !matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return out;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        out.push(KeyCode::Esc);
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        CKeyCode::Char(c) if ctrl => match ctrl_key(c) {
            Some(k) => out.push(k),
            None => out.clear(),
        },
        CKeyCode::Char(c) => {
            let mut buf = [0u8; 4];
            out.extend(c.encode_utf8(&mut buf).bytes().map(KeyCode::Char));
        }
        CKeyCode::Null => out.push(KeyCode::Ctrl(b' ')),
        CKeyCode::Enter => out.push(KeyCode::Enter),
        CKeyCode::Tab => out.push(KeyCode::Tab),
        CKeyCode::Backspace => out.push(KeyCode::Backspace),
        CKeyCode::Esc => out.push(KeyCode::Esc),
        CKeyCode::Left => out.push(KeyCode::Left),
        CKeyCode::Right => out.push(KeyCode::Right),
        CKeyCode::Up => out.push(KeyCode::Up),
        CKeyCode::Down => out.push(KeyCode::Down),
        CKeyCode::Delete => out.push(KeyCode::Delete),
        CKeyCode::Home => out.push(KeyCode::Home),
        CKeyCode::End => out.push(KeyCode::End),
        CKeyCode::PageUp => out.push(KeyCode::PageUp),
        CKeyCode::PageDown => out.push(KeyCode::PageDown),
        _ => out.clear(),
    }
    out
}
