//! Byte classes used by word motion and word deletion.

const WORD_PUNCTUATION: &[u8] = b"/!@#$%^&*+-=~";

/// Word bytes: ASCII alphanumerics, `_`, a fixed punctuation set, and any
/// byte of a multi-byte scalar.
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80 || WORD_PUNCTUATION.contains(&b)
}

/// C-locale whitespace: space, `\t`, `\n`, `\v`, `\f`, `\r`.
pub fn is_space_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
