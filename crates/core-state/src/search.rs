//! Incremental search over raw row bytes.

use core_text::Position;
use tracing::debug;

use crate::document::{Document, Viewport};
use crate::error::EditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

fn find_in(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > hay.len() || needle.len() > hay.len() - from {
        return None;
    }
    hay[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

fn rfind_in(hay: &[u8], needle: &[u8], before: usize) -> Option<usize> {
    if needle.len() > hay.len() {
        return None;
    }
    let last_start = hay.len() - needle.len();
    (0..=last_start)
        .rev()
        .filter(|&i| i < before)
        .find(|&i| &hay[i..i + needle.len()] == needle)
}

/// Find `query` starting from `from`, wrapping around the document at most
/// once. With `inclusive` a match exactly at `from` counts; otherwise the
/// search begins one byte past (forward) or strictly before (backward) it.
pub fn find(
    doc: &Document,
    query: &[u8],
    from: Position,
    direction: SearchDirection,
    inclusive: bool,
) -> Option<Position> {
    let n = doc.row_count();
    if n == 0 || query.is_empty() {
        return None;
    }
    let start_row = from.row.min(n - 1);
    let start_col = if from.row < n { from.col } else { 0 };
    for step in 0..=n {
        let r = match direction {
            SearchDirection::Forward => (start_row + step) % n,
            SearchDirection::Backward => (start_row + n - step % n) % n,
        };
        let hay = doc.row(r)?.raw();
        let hit = match (direction, step) {
            (SearchDirection::Forward, 0) => {
                find_in(hay, query, if inclusive { start_col } else { start_col + 1 })
            }
            (SearchDirection::Backward, 0) => {
                rfind_in(hay, query, if inclusive { start_col + 1 } else { start_col })
            }
            (SearchDirection::Forward, _) => find_in(hay, query, 0),
            (SearchDirection::Backward, _) => rfind_in(hay, query, usize::MAX),
        };
        if let Some(col) = hit {
            return Some(Position::new(r, col));
        }
    }
    None
}

/// State of one interactive search session.
///
/// The origin is where the cursor was when the session began. A changed
/// query restarts from the origin; stepping continues from the last match.
#[derive(Debug, Clone)]
pub struct Search {
    origin: Position,
    origin_viewport: Viewport,
    last_match: Option<Position>,
    direction: SearchDirection,
    last_query: String,
}

impl Search {
    pub fn begin(doc: &Document) -> Self {
        Self {
            origin: doc.cursor(),
            origin_viewport: doc.viewport,
            last_match: None,
            direction: SearchDirection::Forward,
            last_query: String::new(),
        }
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn last_match(&self) -> Option<Position> {
        self.last_match
    }

    /// Run the search for `query`. `step` asks for the next match in a
    /// direction instead of re-searching from the origin.
    pub fn update(
        &mut self,
        doc: &mut Document,
        query: &str,
        step: Option<SearchDirection>,
        screen_rows: usize,
    ) -> Result<Position, EditError> {
        if query != self.last_query {
            self.last_match = None;
            self.direction = SearchDirection::Forward;
            self.last_query = query.to_string();
        }
        if let Some(dir) = step {
            self.direction = dir;
        }
        if query.is_empty() {
            self.restore(doc);
            return Ok(self.origin);
        }
        let (from, inclusive) = match self.last_match {
            Some(m) if step.is_some() => (m, false),
            Some(m) => (m, true),
            None => (self.origin, step.is_none()),
        };
        match find(doc, query.as_bytes(), from, self.direction, inclusive) {
            Some(pos) => {
                self.last_match = Some(pos);
                doc.set_cursor(pos);
                doc.recenter(screen_rows);
                debug!(target: "state.search", row = pos.row, col = pos.col, direction = ?self.direction, "match");
                Ok(pos)
            }
            None => {
                self.last_match = None;
                self.restore(doc);
                debug!(target: "state.search", query, "no_match");
                Err(EditError::NoMatch(query.to_string()))
            }
        }
    }

    /// Put cursor and viewport back where the session began.
    pub fn restore(&self, doc: &mut Document) {
        doc.set_cursor(self.origin);
        doc.viewport = self.origin_viewport;
    }
}
