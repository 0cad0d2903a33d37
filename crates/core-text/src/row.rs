//! A single line of raw bytes with a lazily rebuilt render form.
//!
//! `render` is a pure function of `raw`. Every mutation of `raw` marks the
//! render form stale; [`Row::render`] rebuilds it on demand and
//! [`Row::rendered`] refuses to hand out a stale copy.

use crate::width::{self, is_continuation};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    raw: Vec<u8>,
    render: Vec<u8>,
    render_dirty: bool,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            raw: bytes.into(),
            render: Vec::new(),
            render_dirty: true,
        }
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn byte_at(&self, at: usize) -> Option<u8> {
        self.raw.get(at).copied()
    }

    pub fn is_render_dirty(&self) -> bool {
        self.render_dirty
    }

    fn touch(&mut self) {
        self.render_dirty = true;
    }

    /// Insert one byte; `at` is clamped into `[0, len]`.
    pub fn insert_byte(&mut self, at: usize, b: u8) {
        let at = at.min(self.raw.len());
        self.raw.insert(at, b);
        self.touch();
    }

    /// Insert a run of bytes; `at` is clamped into `[0, len]`.
    pub fn insert_bytes(&mut self, at: usize, bytes: &[u8]) {
        let at = at.min(self.raw.len());
        self.raw.splice(at..at, bytes.iter().copied());
        self.touch();
    }

    /// Remove the byte at `at`, if any.
    pub fn delete_byte(&mut self, at: usize) -> Option<u8> {
        if at >= self.raw.len() {
            return None;
        }
        self.touch();
        Some(self.raw.remove(at))
    }

    /// Remove `start..end` (clamped) and return the removed bytes.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Vec<u8> {
        let end = end.min(self.raw.len());
        let start = start.min(end);
        self.touch();
        self.raw.drain(start..end).collect()
    }

    /// Split at `at`, keeping `[0, at)` and returning the tail.
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.raw.len());
        self.touch();
        self.raw.split_off(at)
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.raw.extend_from_slice(bytes);
        self.touch();
    }

    pub fn set(&mut self, bytes: impl Into<Vec<u8>>) {
        self.raw = bytes.into();
        self.touch();
    }

    /// Rebuild the render form: tabs expand to spaces up to the next stop,
    /// C0 control bytes become `\XX`, everything else is copied verbatim.
    pub fn update_render(&mut self) {
        let mut out = Vec::with_capacity(self.raw.len());
        let (mut at, mut col) = (0usize, 0usize);
        while let Some(s) = width::step(&self.raw, at, col) {
            let b = self.raw[at];
            if b == b'\t' {
                out.extend(std::iter::repeat_n(b' ', s.width));
            } else if b < 0x20 {
                out.push(b'\\');
                out.push(hex_digit(b >> 4));
                out.push(hex_digit(b & 0x0f));
            } else {
                out.extend_from_slice(&self.raw[at..at + s.len]);
            }
            at += s.len;
            col += s.width;
        }
        self.render = out;
        self.render_dirty = false;
    }

    /// Render form, rebuilt first if stale.
    pub fn render(&mut self) -> &[u8] {
        if self.render_dirty {
            self.update_render();
        }
        &self.render
    }

    /// Render form for read-only consumers; `None` while stale.
    pub fn rendered(&self) -> Option<&[u8]> {
        (!self.render_dirty).then_some(self.render.as_slice())
    }

    /// Display column of byte offset `byte_offset` (clamped to the row).
    pub fn cursor_to_render(&self, byte_offset: usize) -> usize {
        let limit = byte_offset.min(self.raw.len());
        let (mut at, mut col) = (0usize, 0usize);
        while at < limit {
            let Some(s) = width::step(&self.raw, at, col) else {
                break;
            };
            at += s.len;
            col += s.width;
        }
        col
    }

    /// Byte offset of the last unit whose starting column does not pass
    /// `column`. A column inside a wide glyph or a tab maps to its first byte.
    pub fn render_to_cursor(&self, column: usize) -> usize {
        let (mut at, mut col) = (0usize, 0usize);
        while let Some(s) = width::step(&self.raw, at, col) {
            if col + s.width > column {
                break;
            }
            at += s.len;
            col += s.width;
        }
        at
    }

    /// Offset of the character boundary before `at`, skipping continuation bytes.
    pub fn prev_boundary(&self, at: usize) -> usize {
        let mut at = at.min(self.raw.len());
        if at == 0 {
            return 0;
        }
        at -= 1;
        while at > 0 && is_continuation(self.raw[at]) {
            at -= 1;
        }
        at
    }

    /// Offset of the character boundary after `at`, skipping continuation bytes.
    pub fn next_boundary(&self, at: usize) -> usize {
        let len = self.raw.len();
        if at >= len {
            return len;
        }
        let mut at = at + 1;
        while at < len && is_continuation(self.raw[at]) {
            at += 1;
        }
        at
    }

    /// Clamp `at` into the row and move it back off any continuation byte.
    pub fn snap_to_boundary(&self, at: usize) -> usize {
        let mut at = at.min(self.raw.len());
        while at > 0 && at < self.raw.len() && is_continuation(self.raw[at]) {
            at -= 1;
        }
        at
    }

    /// Offset of the first byte that is neither a space nor a tab.
    pub fn first_non_whitespace(&self) -> usize {
        self.raw
            .iter()
            .position(|&b| b != b' ' && b != b'\t')
            .unwrap_or(self.raw.len())
    }

    /// Leading spaces and tabs.
    pub fn indent(&self) -> &[u8] {
        &self.raw[..self.first_non_whitespace()]
    }

    /// Display width of the whole row.
    pub fn display_width(&self) -> usize {
        self.cursor_to_render(self.raw.len())
    }
}

fn hex_digit(nibble: u8) -> u8 {
    match nibble & 0x0f {
        n @ 0..=9 => b'0' + n,
        n => b'A' + (n - 10),
    }
}
