//! Property-based tests for abstract truncation.

use proptest::prelude::*;
use arxiv_mistral_mcp::formatters::{TRUNCATION_MARKER, truncate_words};

/// Text made of words separated by single or repeated whitespace.
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(("[A-Za-zéü0-9]{1,12}", "[ \n\t]{1,3}"), 0..60)
        .prop_map(|parts| parts.into_iter().map(|(word, gap)| word + &gap).collect())
}

proptest! {
    /// Output never exceeds the limit.
    #[test]
    fn truncation_respects_limit(text in arb_text(), max in 0usize..400) {
        let out = truncate_words(&text, max);
        prop_assert!(out.chars().count() <= max || out == text);
    }

    /// Truncating again with the same or a larger limit changes nothing.
    #[test]
    fn truncation_is_idempotent(text in arb_text(), max in 0usize..400, extra in 0usize..100) {
        let once = truncate_words(&text, max).into_owned();
        let again = truncate_words(&once, max);
        prop_assert_eq!(again.as_ref(), once.as_str());
        let wider = truncate_words(&once, max + extra);
        prop_assert_eq!(wider.as_ref(), once.as_str());
    }

    /// The kept text is a prefix of the input ending at a word boundary.
    #[test]
    fn truncation_never_splits_words(text in arb_text(), max in 15usize..400) {
        let out = truncate_words(&text, max);
        if out != text {
            let kept = out.strip_suffix(TRUNCATION_MARKER).expect("marker appended");
            prop_assert!(text.starts_with(kept));

            let rest = &text[kept.len()..];
            prop_assert!(kept.is_empty() || rest.starts_with(char::is_whitespace));
        }
    }

    /// Text within the limit is returned untouched.
    #[test]
    fn short_text_is_unchanged(text in arb_text()) {
        let len = text.chars().count();
        let out = truncate_words(&text, len);
        prop_assert_eq!(out.as_ref(), text.as_str());
    }
}
