//! Sentence splitting

/// Split text into sentence-like units on runs of `.`, `!`, and `?`
///
/// Newlines are treated as spaces. Fragments are trimmed and kept only when
/// longer than `min_chars` characters. Order follows the source text.
///
/// # Examples
///
/// ```
/// use truthverse_extractor::split_sentences;
///
/// let s = split_sentences("Short. This one is long enough to keep!!! Ok?", 20);
/// assert_eq!(s, vec!["This one is long enough to keep".to_string()]);
/// ```
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(|fragment| fragment.replace(['\n', '\r'], " "))
        .map(|fragment| fragment.trim().to_string())
        .filter(|fragment| fragment.chars().count() > min_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_all_terminators() {
        let text = "The first sentence is quite long. The second one is also long! \
                    Is the third one long enough?";
        let sentences = split_sentences(text, 20);
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "The first sentence is quite long");
        assert_eq!(sentences[2], "Is the third one long enough");
    }

    #[test]
    fn test_short_fragments_dropped() {
        // exactly 20 characters is dropped
        let text = "abcdefghijklmnopqrst. abcdefghijklmnopqrstu.";
        let sentences = split_sentences(text, 20);
        assert_eq!(sentences, vec!["abcdefghijklmnopqrstu".to_string()]);
    }

    #[test]
    fn test_newlines_become_spaces() {
        let sentences = split_sentences("A headline that wraps\nonto the next line.", 20);
        assert_eq!(sentences, vec!["A headline that wraps onto the next line".to_string()]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 10 two-byte characters: 20 bytes but only 10 chars
        let sentences = split_sentences("éééééééééé.", 15);
        assert!(sentences.is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert!(split_sentences("", 20).is_empty());
        assert!(split_sentences("...!!!???", 0).is_empty());
    }
}
