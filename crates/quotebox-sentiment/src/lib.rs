//! Sentiment scoring for quotebox.
//!
//! Maps text to `neg`/`neu`/`pos` proportions plus a `compound` score in
//! `[-1, 1]`, and derives a Positive/Neutral/Negative label from the compound
//! score using fixed thresholds. Scoring is stateless and never fails.

pub mod scorer;
pub mod types;

pub use scorer::{polarity_scores, LexiconScorer};
pub use types::{
    PolarityScorer, SentimentLabel, SentimentResult, SentimentScores, NEGATIVE_THRESHOLD,
    POSITIVE_THRESHOLD,
};

/// Score `text` with the default [`LexiconScorer`] and label the result.
#[must_use]
pub fn score(text: &str) -> SentimentResult {
    LexiconScorer.score(text)
}
