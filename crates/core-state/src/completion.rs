//! Shared completion helpers for buffer names and paths.

/// Outcome of one completion-key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// New accumulator contents, when the input should change.
    pub replacement: Option<String>,
    /// Status line text describing the match set.
    pub message: String,
}

/// Byte-wise common prefix of `names`, cut back to a character boundary.
pub fn longest_common_prefix<S: AsRef<str>>(names: &[S]) -> String {
    let Some((first, rest)) = names.split_first() else {
        return String::new();
    };
    let first = first.as_ref();
    let mut len = first.len();
    for name in rest {
        let common = first
            .bytes()
            .zip(name.as_ref().bytes())
            .take_while(|(a, b)| a == b)
            .count();
        len = len.min(common);
    }
    while !first.is_char_boundary(len) {
        len -= 1;
    }
    first[..len].to_string()
}

/// `"N matches: a, b, c"`, cut to at most `width` bytes.
pub fn format_candidates<S: AsRef<str>>(names: &[S], width: usize) -> String {
    let mut msg = format!("{} matches: ", names.len());
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            msg.push_str(", ");
        }
        msg.push_str(name.as_ref());
        if msg.len() >= width {
            break;
        }
    }
    truncate_at_boundary(&mut msg, width);
    msg
}

fn truncate_at_boundary(s: &mut String, width: usize) {
    if s.len() <= width {
        return;
    }
    let mut cut = width;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}
