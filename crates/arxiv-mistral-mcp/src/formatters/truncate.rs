//! Word-boundary truncation for abstracts placed in prompts.

use std::borrow::Cow;

/// Appended to text that was cut short.
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Truncate `text` to at most `max_chars` characters without splitting a word.
///
/// Text that already fits is returned unchanged. Otherwise the longest run of
/// whole words that leaves room for [`TRUNCATION_MARKER`] is kept, trailing
/// whitespace is dropped and the marker is appended. Because the output always
/// fits, truncating it again with the same or a larger limit is a no-op.
#[must_use]
pub fn truncate_words(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }

    let marker_len = TRUNCATION_MARKER.chars().count();
    if max_chars < marker_len {
        return Cow::Owned(TRUNCATION_MARKER.chars().take(max_chars).collect());
    }

    let budget = max_chars - marker_len;
    let mut cut = 0;
    for (count, (idx, ch)) in text.char_indices().enumerate() {
        if count > budget {
            break;
        }
        if ch.is_whitespace() {
            cut = idx;
        }
    }

    Cow::Owned(format!("{}{TRUNCATION_MARKER}", text[..cut].trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_borrowed() {
        let result = truncate_words("short abstract", 500);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "short abstract");
    }

    #[test]
    fn test_cuts_at_word_boundary() {
        let text = "alpha beta gamma delta epsilon zeta";
        let result = truncate_words(text, 30);
        assert_eq!(result, "alpha beta... [truncated]");
        assert!(result.chars().count() <= 30);
    }

    #[test]
    fn test_exact_fit_is_untouched() {
        let text = "x".repeat(500);
        assert_eq!(truncate_words(&text, 500), text);
    }

    #[test]
    fn test_single_long_word_keeps_only_marker() {
        let text = "a".repeat(100);
        assert_eq!(truncate_words(&text, 40), TRUNCATION_MARKER);
    }

    #[test]
    fn test_tiny_limit_never_exceeds() {
        let result = truncate_words("one two three", 5);
        assert_eq!(result.chars().count(), 5);
    }

    #[test]
    fn test_idempotent() {
        let text = "Transformers have become the dominant architecture for sequence modelling \
                    across language, vision and audio tasks.";
        let once = truncate_words(text, 60).into_owned();
        assert_eq!(truncate_words(&once, 60), once);
        assert_eq!(truncate_words(&once, 200), once);
    }

    #[test]
    fn test_multibyte_text() {
        let text = "Schrödinger équation über große Systeme mit vielen Teilchen";
        let result = truncate_words(text, 35);
        assert!(result.chars().count() <= 35);
        assert!(result.starts_with("Schrödinger"));
        assert!(result.ends_with(TRUNCATION_MARKER));
    }
}
