//! Process-wide cut buffer with delete chaining.
//!
//! Consecutive deletes accumulate into one entry while `chaining` is set.
//! Any insertion, interactive motion or untracked delete breaks the chain,
//! so the next delete starts a fresh entry. Content survives document switches and is only
//! discarded by an explicit flush (or replaced by a new chain).

use tracing::trace;

/// How a deleted character feeds the kill ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillMode {
    /// Leave the content untouched but break the chain.
    NoOp,
    /// Deleting forward: grow the entry at its end.
    Append,
    /// Deleting backward: grow the entry at its start.
    Prepend,
    /// Replace the entry with the deleted character.
    Set,
    /// Discard the entry and stop chaining.
    Flush,
}

#[derive(Debug, Clone, Default)]
pub struct KillRing {
    content: Option<Vec<u8>>,
    chaining: bool,
}

impl KillRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    pub fn len(&self) -> usize {
        self.content.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    pub fn is_chaining(&self) -> bool {
        self.chaining
    }

    /// Mark a kill sequence as open so following deletes coalesce.
    pub fn open_chain(&mut self) {
        self.chaining = true;
    }

    pub fn break_chain(&mut self) {
        if self.chaining {
            trace!(target: "state.killring", len = self.len(), "chain_broken");
        }
        self.chaining = false;
    }

    /// Discard any prior content and begin a one-byte entry.
    pub fn start_with_char(&mut self, ch: u8) {
        self.start_with(&[ch]);
    }

    pub fn append_char(&mut self, ch: u8) {
        self.append(&[ch]);
    }

    pub fn prepend_char(&mut self, ch: u8) {
        self.prepend(&[ch]);
    }

    pub fn start_with(&mut self, bytes: &[u8]) {
        self.content = Some(bytes.to_vec());
    }

    pub fn append(&mut self, bytes: &[u8]) {
        match self.content.as_mut() {
            Some(c) => c.extend_from_slice(bytes),
            None => self.start_with(bytes),
        }
    }

    pub fn prepend(&mut self, bytes: &[u8]) {
        match self.content.as_mut() {
            Some(c) => {
                c.splice(0..0, bytes.iter().copied());
            }
            None => self.start_with(bytes),
        }
    }

    /// Discard the content and clear chaining. Returns the discarded length.
    pub fn flush(&mut self) -> usize {
        let len = self.len();
        self.content = None;
        self.chaining = false;
        trace!(target: "state.killring", len, "flush");
        len
    }

    /// Feed one deleted character (one or more bytes) according to `mode`.
    ///
    /// The first delete of a chain always starts a new entry; later deletes
    /// grow it in the direction `mode` names.
    pub fn record(&mut self, mode: KillMode, deleted: &[u8]) {
        match mode {
            KillMode::NoOp => {
                self.break_chain();
                return;
            }
            KillMode::Flush => {
                self.flush();
                return;
            }
            _ => {}
        }
        if !self.chaining {
            self.start_with(deleted);
            self.chaining = true;
        } else {
            match mode {
                KillMode::Set => self.start_with(deleted),
                KillMode::Append => self.append(deleted),
                KillMode::Prepend => self.prepend(deleted),
                KillMode::NoOp | KillMode::Flush => {}
            }
        }
        trace!(target: "state.killring", ?mode, len = self.len(), "record");
    }
}
