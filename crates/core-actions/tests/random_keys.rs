mod common;
use common::*;

use proptest::prelude::*;

// Key groups that never touch the filesystem or quit.
const GROUPS: &[&str] = &[
    "a", "b", "SPC", "RET", "TAB", "BS", "DEL", "UP", "DOWN", "LEFT", "RIGHT", "HOME", "END",
    "PGUP", "PGDN", "C-w", "C-y", "C-u 3 a", "C-u 2 C-k d", "C-g", "ESC f", "ESC b", "ESC d", "ESC BS",
    "ESC m", "ESC w", "ESC q", "ESC <", "ESC >", "C-k SPC", "C-k d", "C-k DEL", "C-k u",
    "C-k U", "C-k =", "C-k -", "C-k y", "C-k BS", "C-k j", "C-k C-SPC", "C-k f", "C-s a RET",
    "C-k g 2 RET",
];

proptest! {
    #[test]
    fn random_keys_keep_cursor_valid(picks in proptest::collection::vec(0..GROUPS.len(), 1..120)) {
        let mut h = Harness::new(&["alpha beta", "", "\tgamma  delta", "é ü"]);
        for i in picks {
            h.press(GROUPS[i]);
            let doc = h.state.current_doc();
            let at = doc.cursor();
            prop_assert!(at.row <= doc.row_count());
            if let Some(row) = doc.row(at.row) {
                prop_assert!(at.col <= row.len());
                prop_assert!(std::str::from_utf8(&row.raw()[..at.col]).is_ok());
            } else {
                prop_assert_eq!(at.col, 0);
            }
            prop_assert!(h.session.prompt().is_none());
        }
    }
}
