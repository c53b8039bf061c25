//! Canonical text form and the dedup hash

use sha2::{Digest, Sha256};

/// Token substituted for every run of digits before hashing
pub const DIGIT_PLACEHOLDER: &str = "#NUM#";

/// Lowercase, trim, and collapse internal whitespace to single spaces
///
/// Idempotent: `canonicalize(&canonicalize(s)) == canonicalize(s)`.
///
/// # Examples
///
/// ```
/// use truthverse_extractor::canonicalize;
///
/// assert_eq!(canonicalize("  The   AI  Improves\nHealth  "), "the ai improves health");
/// ```
pub fn canonicalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hex-encoded SHA-256 of the digit-insensitive, punctuation-free canonical form
///
/// Digits are replaced before punctuation is stripped, so the placeholder
/// itself loses its `#` marks. Claims differing only in numbers or
/// punctuation hash equal.
///
/// # Examples
///
/// ```
/// use truthverse_extractor::canonical_hash;
///
/// assert_eq!(
///     canonical_hash("X increased by 10%"),
///     canonical_hash("X increased by 99%"),
/// );
/// assert_eq!(canonical_hash("abc").len(), 64);
/// ```
pub fn canonical_hash(text: &str) -> String {
    let canonical = canonicalize(text);
    let stripped: String = mask_digit_runs(&canonical)
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();

    let mut hasher = Sha256::new();
    hasher.update(stripped.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Replace each maximal run of ASCII decimal digits with [`DIGIT_PLACEHOLDER`]
fn mask_digit_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            if !in_run {
                out.push_str(DIGIT_PLACEHOLDER);
                in_run = true;
            }
        } else {
            in_run = false;
            out.push(c);
        }
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_collapses_whitespace() {
        assert_eq!(
            canonicalize("  The   AI  improves  healthcare  "),
            canonicalize("the ai improves healthcare")
        );
        assert_eq!(canonicalize("a\t\tb\n\nc"), "a b c");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_hash_ignores_case_and_whitespace() {
        assert_eq!(
            canonical_hash("  The AI Improves Health  "),
            canonical_hash("the ai improves health")
        );
    }

    #[test]
    fn test_hash_ignores_digits_and_punctuation() {
        assert_eq!(
            canonical_hash("Unemployment fell to 3.5%!"),
            canonical_hash("unemployment fell to 12,9%")
        );
    }

    #[test]
    fn test_hash_distinguishes_wording() {
        assert_ne!(
            canonical_hash("prices increased by 10%"),
            canonical_hash("prices decreased by 10%")
        );
    }

    #[test]
    fn test_digit_runs_masked_once() {
        assert_eq!(mask_digit_runs("up 12 to 345x"), "up #NUM# to #NUM#x");
        assert_eq!(mask_digit_runs("no digits"), "no digits");
    }

    #[test]
    fn test_only_decimal_digits_masked() {
        assert_eq!(mask_digit_runs("x² ½ Ⅻ 42"), "x² ½ Ⅻ #NUM#");
        assert_ne!(canonical_hash("area is x²"), canonical_hash("area is x3"));
    }

    #[test]
    fn test_hash_is_known_sha256() {
        // sha256("") is the well-known empty digest
        assert_eq!(
            canonical_hash("   "),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
