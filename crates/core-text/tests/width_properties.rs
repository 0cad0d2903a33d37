//! Property tests for the byte offset <-> display column mapping.

use core_text::Row;
use proptest::prelude::*;

fn row_text() -> impl Strategy<Value = String> {
    // Mix of ASCII, tabs, control bytes, accented, CJK and emoji scalars.
    prop::collection::vec(
        prop_oneof![
            Just('a'),
            Just(' '),
            Just('\t'),
            Just('\u{1}'),
            Just('é'),
            Just('你'),
            Just('😀'),
            Just('\u{301}'),
            any::<char>(),
        ],
        0..40,
    )
    .prop_map(|cs| cs.into_iter().collect())
}

proptest! {
    // Every scalar boundary survives the round trip through its display column.
    #[test]
    fn render_to_cursor_inverts_cursor_to_render(text in row_text()) {
        let row = Row::from_bytes(text.as_bytes().to_vec());
        for (k, _) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
            let col = row.cursor_to_render(k);
            prop_assert_eq!(row.render_to_cursor(col), k);
        }
    }

    // Columns grow strictly across scalar boundaries.
    #[test]
    fn columns_strictly_increase(text in row_text()) {
        let row = Row::from_bytes(text.as_bytes().to_vec());
        let mut last = None;
        for (k, _) in text.char_indices() {
            let col = row.cursor_to_render(k);
            if let Some(prev) = last {
                prop_assert!(col > prev);
            }
            last = Some(col);
        }
    }

    // The render form is exactly as wide as the last cursor column, for
    // rows that render one byte per cell.
    #[test]
    fn ascii_render_width_matches(text in "[ -~\t]{0,40}") {
        let mut row = Row::from_bytes(text.as_bytes().to_vec());
        let end = row.cursor_to_render(row.len());
        prop_assert_eq!(row.render().len(), end);
    }

    // Boundary helpers never land inside a scalar.
    #[test]
    fn boundaries_are_char_boundaries(text in row_text(), at in 0usize..200) {
        let row = Row::from_bytes(text.as_bytes().to_vec());
        let snapped = row.snap_to_boundary(at);
        prop_assert!(text.is_char_boundary(snapped));
        prop_assert!(text.is_char_boundary(row.next_boundary(snapped)));
        prop_assert!(text.is_char_boundary(row.prev_boundary(snapped)));
    }
}
