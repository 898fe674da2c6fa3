use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest compound score classified as [`SentimentLabel::Positive`].
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Highest compound score classified as [`SentimentLabel::Negative`].
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Polarity of a piece of text.
///
/// `neg`, `neu` and `pos` are proportions in `[0, 1]` that sum to 1 within
/// rounding. `compound` is the normalized aggregate in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl SentimentScores {
    /// The "no signal" score returned for empty or unscorable text.
    pub const NEUTRAL: Self = Self {
        neg: 0.0,
        neu: 1.0,
        pos: 0.0,
        compound: 0.0,
    };

    #[must_use]
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

impl Default for SentimentScores {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Classify a compound score using the fixed thresholds.
    #[must_use]
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            Self::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Negative => write!(f, "Negative"),
        }
    }
}

/// Scores plus the label derived from them, as returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    #[serde(flatten)]
    pub scores: SentimentScores,
    pub label: SentimentLabel,
}

impl From<SentimentScores> for SentimentResult {
    fn from(scores: SentimentScores) -> Self {
        Self {
            label: scores.label(),
            scores,
        }
    }
}

/// Any polarity engine that honours the [`SentimentScores`] contract.
///
/// Implementations must be deterministic and must not fail: unscorable input
/// yields [`SentimentScores::NEUTRAL`].
pub trait PolarityScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> SentimentScores;

    fn score(&self, text: &str) -> SentimentResult {
        self.polarity_scores(text).into()
    }
}
