//! Claim module - the unit of work flowing through the verification pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a claim: the hex-encoded canonical hash of its text
///
/// The hash is computed by the extractor over a digit-insensitive,
/// punctuation-stripped form of the claim, so two claims that differ only in
/// their numbers share an identifier. Deduplication across requests relies on
/// this; it is a known precision/recall trade-off.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Wrap an already computed hex digest
    ///
    /// # Examples
    ///
    /// ```
    /// use truthverse_domain::ClaimId;
    ///
    /// let id = ClaimId::from_digest("ab12");
    /// assert_eq!(id.as_str(), "ab12");
    /// ```
    pub fn from_digest(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Borrow the hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for log lines and tables
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        self.0.get(..end).unwrap_or(&self.0)
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate factual claim extracted from source text
///
/// Claims are created per verification request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Dedup hash of the canonical text
    pub id: ClaimId,

    /// The sentence as it appeared in the source (trimmed)
    pub raw_text: String,

    /// Lowercased, whitespace-collapsed form of `raw_text`
    pub canonical_text: String,
}

impl Claim {
    /// Create a new claim
    pub fn new(id: ClaimId, raw_text: String, canonical_text: String) -> Self {
        Self {
            id,
            raw_text,
            canonical_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_short() {
        let id = ClaimId::from_digest("0123456789abcdef0123");
        assert_eq!(id.short(), "0123456789ab");

        let tiny = ClaimId::from_digest("abc");
        assert_eq!(tiny.short(), "abc");
    }

    #[test]
    fn test_claim_id_serializes_as_string() {
        let id = ClaimId::from_digest("deadbeef");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"deadbeef\"");
    }
}
