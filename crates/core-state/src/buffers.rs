//! The ordered set of open documents.
//!
//! Never empty: closing the last document creates a fresh unnamed one before
//! the close completes, so `current` always indexes a live document.

use tracing::debug;

use crate::completion::{Completion, format_candidates, longest_common_prefix};
use crate::document::{Document, NO_NAME};
use crate::error::EditError;

#[derive(Debug)]
pub struct BufferSet {
    documents: Vec<Document>,
    current: usize,
}

impl Default for BufferSet {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferSet {
    pub fn new() -> Self {
        Self {
            documents: vec![Document::new()],
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Document {
        &self.documents[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Document {
        &mut self.documents[self.current]
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Append a new empty, unnamed document. Does not switch to it.
    pub fn add_empty(&mut self) -> usize {
        self.add(Document::new())
    }

    pub fn add(&mut self, doc: Document) -> usize {
        self.documents.push(doc);
        let index = self.documents.len() - 1;
        debug!(target: "state.buffers", index, count = self.documents.len(), "add");
        index
    }

    /// Make `index` current. Returns false when already current or out of range.
    pub fn switch(&mut self, index: usize) -> bool {
        if index == self.current || index >= self.documents.len() {
            return false;
        }
        self.current = index;
        debug!(target: "state.buffers", index, name = self.current().display_name(), "switch");
        true
    }

    pub fn next(&mut self) -> bool {
        let n = self.documents.len();
        self.switch((self.current + 1) % n)
    }

    pub fn prev(&mut self) -> bool {
        let n = self.documents.len();
        self.switch((self.current + n - 1) % n)
    }

    /// Close the current document, moving to its previous neighbor (or next
    /// when it is first). Returns the new current index.
    pub fn close_current(&mut self) -> usize {
        if self.documents.len() == 1 {
            self.documents.push(Document::new());
        }
        let closing = self.current;
        let neighbor = if closing > 0 { closing - 1 } else { closing + 1 };
        let closed = self.documents.remove(closing);
        self.current = if neighbor > closing { neighbor - 1 } else { neighbor };
        debug!(target: "state.buffers", closed = closed.display_name(), current = self.current, count = self.documents.len(), "close");
        self.current
    }

    fn names_match(doc: &Document, pred: impl Fn(&str) -> bool) -> bool {
        match doc.path.as_deref() {
            Some(path) => pred(path) || pred(doc.display_name()),
            None => pred(NO_NAME),
        }
    }

    /// Exact match on full path, basename, or `[No Name]` for unnamed documents.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.documents
            .iter()
            .position(|d| Self::names_match(d, |n| n == name))
    }

    /// Every document whose path, basename, or sentinel name starts with `prefix`.
    pub fn collect_prefix_matches(&self, prefix: &str) -> Vec<usize> {
        self.documents
            .iter()
            .enumerate()
            .filter(|(_, d)| Self::names_match(d, |n| n.starts_with(prefix)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Common prefix of the display names of `candidates`.
    pub fn longest_common_prefix(&self, candidates: &[usize]) -> String {
        let names: Vec<&str> = candidates
            .iter()
            .filter_map(|&i| self.documents.get(i))
            .map(Document::display_name)
            .collect();
        longest_common_prefix(&names)
    }

    /// Switch by exact name, else by unique prefix.
    pub fn switch_by_name(&mut self, name: &str) -> Result<usize, EditError> {
        if self.documents.len() < 2 {
            return Err(EditError::NoOtherBuffers);
        }
        let index = match self.find_by_name(name) {
            Some(i) => i,
            None => match self.collect_prefix_matches(name).as_slice() {
                [only] => *only,
                _ => return Err(EditError::NoSuchBuffer(name.to_string())),
            },
        };
        self.switch(index);
        Ok(index)
    }

    /// Completion for a partially typed buffer name.
    pub fn complete(&self, input: &str, listing_width: usize) -> Result<Completion, EditError> {
        let matches = self.collect_prefix_matches(input);
        let names: Vec<&str> = matches
            .iter()
            .map(|&i| self.documents[i].display_name())
            .collect();
        match names.as_slice() {
            [] => Err(EditError::NoCompletions(input.to_string())),
            [only] => Ok(Completion {
                replacement: Some(only.to_string()),
                message: format!("Unique match: {only}"),
            }),
            _ => {
                let lcp = self.longest_common_prefix(&matches);
                Ok(Completion {
                    replacement: (lcp.len() > input.len()).then_some(lcp),
                    message: format_candidates(&names, listing_width),
                })
            }
        }
    }
}
