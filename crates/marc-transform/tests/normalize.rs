//! Property tests for text normalization.

use proptest::prelude::*;

use marc_transform::normalize_text;

proptest! {
    #[test]
    fn normalization_is_idempotent(value in "[a-z ,.;:()]{0,40}") {
        let once = normalize_text(&value);
        let twice = normalize_text(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_text_has_no_double_spaces_or_trailing_commas(value in "\\PC{0,60}") {
        let normalized = normalize_text(&value);
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.ends_with(','));
    }
}

#[test]
fn collapses_and_strips_together() {
    assert_eq!(normalize_text("Gift of  Jane   Doe,,"), "Gift of Jane Doe");
}
