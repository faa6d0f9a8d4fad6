//! Sentiment profile types.

use serde::{Deserialize, Serialize};

/// Sentiment bucket for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Bucket a raw model label by case-insensitive substring match.
    ///
    /// Anything that is not recognizably negative or neutral counts as
    /// positive, which also covers opaque labels like `LABEL_2`.
    pub fn from_model_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("negative") {
            Self::Negative
        } else if label.contains("neutral") {
            Self::Neutral
        } else {
            Self::Positive
        }
    }
}

/// Aggregated sentiment over one product's reviews.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentProfile {
    /// Count of reviews bucketed positive
    pub positive: u32,

    /// Count of reviews bucketed negative
    pub negative: u32,

    /// Count of reviews bucketed neutral
    pub neutral: u32,

    /// Per-review confidence scores, in review order
    #[serde(default)]
    pub scores: Vec<f32>,

    /// Arithmetic mean of `scores`, 0.0 when empty
    pub average_score: f32,
}

impl SentimentProfile {
    /// Create an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified review.
    pub fn record(&mut self, label: SentimentLabel, score: f32) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
        self.scores.push(score);
        self.average_score = self.scores.iter().sum::<f32>() / self.scores.len() as f32;
    }

    /// Total number of classified reviews.
    pub fn review_count(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_bucketing() {
        assert_eq!(
            SentimentLabel::from_model_label("NEGATIVE"),
            SentimentLabel::Negative
        );
        assert_eq!(
            SentimentLabel::from_model_label("Neutral"),
            SentimentLabel::Neutral
        );
        assert_eq!(
            SentimentLabel::from_model_label("positive"),
            SentimentLabel::Positive
        );
        // Opaque labels default to positive
        assert_eq!(
            SentimentLabel::from_model_label("LABEL_2"),
            SentimentLabel::Positive
        );
    }

    #[test]
    fn test_counts_and_average() {
        let mut profile = SentimentProfile::new();
        profile.record(SentimentLabel::Positive, 0.9);
        profile.record(SentimentLabel::Negative, 0.7);
        profile.record(SentimentLabel::Neutral, 0.5);

        assert_eq!(profile.review_count(), 3);
        assert_eq!(profile.scores.len(), 3);
        assert!((profile.average_score - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_empty_profile() {
        let profile = SentimentProfile::new();
        assert_eq!(profile.review_count(), 0);
        assert_eq!(profile.average_score, 0.0);
    }
}
