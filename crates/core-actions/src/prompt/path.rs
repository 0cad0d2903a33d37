//! File name completion for the open-file prompt.

use std::io;
use std::path::Path;

use core_state::{Completion, format_candidates, longest_common_prefix};

/// Entries considered per directory listing.
pub const MAX_DIR_ENTRIES: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntryInfo {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}

/// Source of directory listings. The filesystem in the editor, a fixed table
/// in tests.
pub trait DirectoryLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            out.push(DirEntryInfo { name, is_dir });
        }
        Ok(out)
    }
}

/// Complete the last path component of `input`.
///
/// The directory part is everything up to the final `/` (`.` when there is
/// none). A unique match gains a trailing `/` when it names a directory.
pub fn complete_path(lister: &dyn DirectoryLister, input: &str, width: usize) -> Completion {
    let (kept, dir, base) = match input.rfind('/') {
        Some(0) => ("/", "/", &input[1..]),
        Some(i) => (&input[..=i], &input[..i], &input[i + 1..]),
        None => ("", ".", input),
    };
    let entries = match lister.list(Path::new(dir)) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(target: "actions.prompt", dir, %err, "list_failed");
            return Completion {
                replacement: None,
                message: format!("No such dir: {dir}"),
            };
        }
    };
    let mut matches: Vec<DirEntryInfo> = entries
        .into_iter()
        .filter(|e| e.name != "." && e.name != ".." && e.name.starts_with(base))
        .take(MAX_DIR_ENTRIES)
        .collect();
    matches.sort_by(|a, b| a.name.cmp(&b.name));

    match matches.as_slice() {
        [] => Completion {
            replacement: None,
            message: format!("No file matches '{base}' in {dir}"),
        },
        [only] => {
            let slash = if only.is_dir { "/" } else { "" };
            Completion {
                replacement: Some(format!("{kept}{}{slash}", only.name)),
                message: format!("Unique match: {}{slash}", only.name),
            }
        }
        _ => {
            let names: Vec<&str> = matches.iter().map(|e| e.name.as_str()).collect();
            let lcp = longest_common_prefix(&names);
            let listed: Vec<String> = matches
                .iter()
                .map(|e| {
                    if e.is_dir {
                        format!("{}/", e.name)
                    } else {
                        e.name.clone()
                    }
                })
                .collect();
            Completion {
                replacement: (lcp.len() > base.len()).then(|| format!("{kept}{lcp}")),
                message: format_candidates(&listed, width),
            }
        }
    }
}
