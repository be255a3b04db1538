//! Feedback sentiment types.
//!
//! A feedback message is scored once, at submission time, to a polarity in
//! `[-1.0, 1.0]`. Its bucket is derived from the stored score with fixed
//! thresholds and is never stored itself.

use serde::{Deserialize, Serialize};

/// Scores strictly above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;

/// Scores strictly below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// A sentiment polarity clamped to `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentimentScore(f64);

impl SentimentScore {
    /// Neutral score.
    pub const NEUTRAL: Self = Self(0.0);

    /// Create a score, clamping into range. `NaN` becomes neutral.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::NEUTRAL;
        }
        Self(value.clamp(-1.0, 1.0))
    }

    /// The raw polarity value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Bucket for this score.
    #[must_use]
    pub fn bucket(self) -> SentimentBucket {
        SentimentBucket::from_score(self.0)
    }
}

/// Coarse sentiment classification shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBucket {
    Positive,
    Negative,
    Neutral,
}

impl SentimentBucket {
    /// Classify a raw score.
    ///
    /// `> 0.1` is positive, `< -0.1` is negative, everything else (including
    /// the thresholds themselves) is neutral.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

/// Per-bucket counts of stored feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentSummary {
    /// Count one entry.
    pub const fn record(&mut self, bucket: SentimentBucket) {
        match bucket {
            SentimentBucket::Positive => self.positive += 1,
            SentimentBucket::Negative => self.negative += 1,
            SentimentBucket::Neutral => self.neutral += 1,
        }
    }

    /// Total number of entries counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

impl FromIterator<f64> for SentimentSummary {
    fn from_iter<I: IntoIterator<Item = f64>>(scores: I) -> Self {
        let mut summary = Self::default();
        for score in scores {
            summary.record(SentimentBucket::from_score(score));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(SentimentBucket::from_score(0.5), SentimentBucket::Positive);
        assert_eq!(SentimentBucket::from_score(0.11), SentimentBucket::Positive);
        assert_eq!(SentimentBucket::from_score(0.1), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::from_score(0.0), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::from_score(-0.1), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::from_score(-0.11), SentimentBucket::Negative);
        assert_eq!(SentimentBucket::from_score(-1.0), SentimentBucket::Negative);
    }

    #[test]
    fn test_bucket_is_total_over_range() {
        // Sweep the range in hundredths; every score lands in exactly one bucket
        for step in -100..=100 {
            let s = f64::from(step) / 100.0;
            let bucket = SentimentBucket::from_score(s);
            let expected = if s > 0.1 {
                SentimentBucket::Positive
            } else if s < -0.1 {
                SentimentBucket::Negative
            } else {
                SentimentBucket::Neutral
            };
            assert_eq!(bucket, expected, "score {s}");
        }
    }

    #[test]
    fn test_score_clamps() {
        assert!((SentimentScore::new(3.0).value() - 1.0).abs() < f64::EPSILON);
        assert!((SentimentScore::new(-7.5).value() + 1.0).abs() < f64::EPSILON);
        assert_eq!(SentimentScore::new(f64::NAN), SentimentScore::NEUTRAL);
    }

    #[test]
    fn test_summary_from_scores() {
        let summary: SentimentSummary = [0.9, 0.2, -0.4, 0.0, 0.05, -0.1].into_iter().collect();
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 3);
        assert_eq!(summary.total(), 6);
    }

    #[test]
    fn test_empty_summary() {
        let summary: SentimentSummary = std::iter::empty().collect();
        assert_eq!(summary, SentimentSummary::default());
        assert_eq!(summary.total(), 0);
    }
}
