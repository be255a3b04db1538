//! Text polarity scoring.

use vader_sentiment::SentimentIntensityAnalyzer;

/// General-purpose text polarity scorer.
pub trait SentimentScorer: Send + Sync {
    /// Polarity of `text`, from -1.0 (negative) to 1.0 (positive).
    fn polarity(&self, text: &str) -> f64;
}

/// VADER compound score.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn polarity(&self, text: &str) -> f64 {
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use jharkhand_tourism_core::{SentimentBucket, SentimentScore};

    use super::*;

    fn bucket(text: &str) -> SentimentBucket {
        SentimentScore::new(VaderScorer::new().polarity(text)).bucket()
    }

    #[test]
    fn test_positive_text() {
        assert_eq!(
            bucket("The waterfalls were beautiful and the guides were wonderful!"),
            SentimentBucket::Positive
        );
    }

    #[test]
    fn test_negative_text() {
        assert_eq!(
            bucket("Terrible roads, awful food and a horrible hotel."),
            SentimentBucket::Negative
        );
    }

    #[test]
    fn test_empty_text_is_neutral() {
        assert_eq!(bucket(""), SentimentBucket::Neutral);
    }

    #[test]
    fn test_polarity_is_bounded() {
        let scorer = VaderScorer::new();
        let score = scorer.polarity("GREAT GREAT GREAT!!! amazing, superb, love love love");
        assert!((-1.0..=1.0).contains(&score));
    }
}
