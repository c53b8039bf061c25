//! Credibility score value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default lower bound (inclusive) of the `verified` band
pub const DEFAULT_VERIFIED_MIN: f64 = 70.0;

/// Default upper bound (inclusive) of the `fake` band
pub const DEFAULT_FAKE_MAX: f64 = 40.0;

/// Categorical verdict derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredibilityLabel {
    /// Score at or above the verified threshold
    Verified,
    /// Score at or below the fake threshold
    Fake,
    /// Anything in between, or no evidence at all
    NeedsReview,
}

impl CredibilityLabel {
    /// Wire name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            CredibilityLabel::Verified => "verified",
            CredibilityLabel::Fake => "fake",
            CredibilityLabel::NeedsReview => "needs_review",
        }
    }
}

impl fmt::Display for CredibilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label thresholds on the 0-100 scale
///
/// Thresholds are configuration: they are threaded into the aggregator by the
/// caller rather than read from process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    /// Scores >= this are `verified`
    #[serde(default = "default_verified_min")]
    pub verified_min: f64,

    /// Scores <= this are `fake`
    #[serde(default = "default_fake_max")]
    pub fake_max: f64,
}

fn default_verified_min() -> f64 {
    DEFAULT_VERIFIED_MIN
}

fn default_fake_max() -> f64 {
    DEFAULT_FAKE_MAX
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            verified_min: DEFAULT_VERIFIED_MIN,
            fake_max: DEFAULT_FAKE_MAX,
        }
    }
}

impl ScoreThresholds {
    /// Create thresholds
    pub fn new(verified_min: f64, fake_max: f64) -> Self {
        Self {
            verified_min,
            fake_max,
        }
    }

    /// Check that both thresholds are on the 0-100 scale and do not overlap
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.verified_min) {
            return Err(format!("verified_min {} out of range [0, 100]", self.verified_min));
        }
        if !(0.0..=100.0).contains(&self.fake_max) {
            return Err(format!("fake_max {} out of range [0, 100]", self.fake_max));
        }
        if self.fake_max >= self.verified_min {
            return Err(format!(
                "fake_max {} must be below verified_min {}",
                self.fake_max, self.verified_min
            ));
        }
        Ok(())
    }

    /// Deterministic label for a score
    ///
    /// # Examples
    ///
    /// ```
    /// use truthverse_domain::{CredibilityLabel, ScoreThresholds};
    ///
    /// let t = ScoreThresholds::default();
    /// assert_eq!(t.label_for(70.0), CredibilityLabel::Verified);
    /// assert_eq!(t.label_for(40.0), CredibilityLabel::Fake);
    /// assert_eq!(t.label_for(55.0), CredibilityLabel::NeedsReview);
    /// ```
    pub fn label_for(&self, score: f64) -> CredibilityLabel {
        if score >= self.verified_min {
            CredibilityLabel::Verified
        } else if score <= self.fake_max {
            CredibilityLabel::Fake
        } else {
            CredibilityLabel::NeedsReview
        }
    }
}

/// Evidence counts by stance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceBreakdown {
    /// Supporting items
    pub supporting: usize,
    /// Contradicting items
    pub contradicting: usize,
    /// Neutral items
    pub neutral: usize,
}

impl EvidenceBreakdown {
    /// Total number of evidence items (N)
    pub fn total(&self) -> usize {
        self.supporting + self.contradicting + self.neutral
    }
}

/// Aggregate verdict for one claim; never mutated after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityScore {
    /// Score in [0, 100], rounded to one decimal
    pub score: f64,

    /// Label derived from `score` and the thresholds
    pub label: CredibilityLabel,

    /// Templated explanation
    pub explanation: String,

    /// Evidence counts
    pub breakdown: EvidenceBreakdown,
}
