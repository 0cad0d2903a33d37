//! Storage collaborator: load a file into a document and write it back.
//!
//! Rows are stored without terminators. Loading splits on `\n` and strips a
//! trailing `\r`; saving writes every row followed by `\n`, including the last.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use core_state::Document;

/// What `load` found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { rows: usize },
    NewFile,
}

/// What `save` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written { bytes: usize },
    Unchanged,
}

/// Reset `doc`, bind it to `path`, and read the file's lines into it. A
/// missing file leaves an empty document bound to the path.
pub fn load(doc: &mut Document, path: &str) -> Result<LoadOutcome> {
    doc.reset();
    doc.path = Some(path.to_string());
    let bytes = match std::fs::read(Path::new(path)) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(target: "io", path, "new_file");
            return Ok(LoadOutcome::NewFile);
        }
        Err(e) => return Err(e).with_context(|| format!("reading {path}")),
    };
    let mut lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
    if bytes.ends_with(b"\n") || bytes.is_empty() {
        lines.pop();
    }
    for line in &lines {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        doc.append_row(line.to_vec());
    }
    tracing::debug!(target: "io", path, rows = lines.len(), bytes = bytes.len(), "file_loaded");
    Ok(LoadOutcome::Loaded { rows: lines.len() })
}

/// Every row followed by a newline.
pub fn serialize(doc: &Document) -> Vec<u8> {
    let len: usize = doc.rows().iter().map(|r| r.len() + 1).sum();
    let mut out = Vec::with_capacity(len);
    for row in doc.rows() {
        out.extend_from_slice(row.raw());
        out.push(b'\n');
    }
    out
}

/// Write `doc` to its path when dirty. The caller supplies a path first for
/// unnamed documents.
pub fn save(doc: &mut Document) -> Result<SaveOutcome> {
    if !doc.dirty {
        return Ok(SaveOutcome::Unchanged);
    }
    let path = doc
        .path
        .clone()
        .context("document has no file name")?;
    let bytes = serialize(doc);
    std::fs::write(&path, &bytes).with_context(|| format!("writing {path}"))?;
    doc.dirty = false;
    tracing::info!(target: "io", path, bytes = bytes.len(), "file_written");
    Ok(SaveOutcome::Written { bytes: bytes.len() })
}
