//! Caption text truncation.

/// Keep the first `max_words` whitespace-delimited tokens of `text`,
/// rejoined with single spaces.
///
/// Runs of whitespace collapse and leading/trailing whitespace is dropped,
/// so the output is normalized even when no truncation happens. Pure and
/// deterministic; no further normalization (casing, punctuation, repeated
/// words) is applied.
pub fn cap_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_to_max_words() {
        assert_eq!(cap_words("a b c d", 2), "a b");
    }

    #[test]
    fn test_short_text_passes_through_normalized() {
        assert_eq!(cap_words("a  cat\ton a\nmat", 10), "a cat on a mat");
    }

    #[test]
    fn test_exact_token_count_unchanged() {
        assert_eq!(cap_words("one two three", 3), "one two three");
    }

    #[test]
    fn test_leading_and_trailing_whitespace_ignored() {
        assert_eq!(cap_words("   hello world   ", 5), "hello world");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(cap_words("", 3), "");
        assert_eq!(cap_words("   \t\n", 3), "");
    }

    #[test]
    fn test_zero_max_words_yields_empty() {
        assert_eq!(cap_words("a b c", 0), "");
    }

    #[test]
    fn test_never_more_than_k_tokens() {
        for k in 0..6 {
            let capped = cap_words("v w x y z", k);
            let count = capped.split_whitespace().count();
            assert!(count <= k, "k={k} produced {count} tokens");
        }
    }
}
