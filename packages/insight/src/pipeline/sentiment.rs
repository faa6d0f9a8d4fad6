//! Sentiment analysis stage.

use tracing::debug;

use crate::error::{InsightError, Result};
use crate::traits::ai::Ai;
use crate::types::config::SearchConfig;
use crate::types::sentiment::{SentimentLabel, SentimentProfile};

use super::truncate_chars;

/// Classify every review and aggregate the results.
///
/// Reviews are truncated to the configured character budget before
/// classification. Any classification failure aborts the whole batch;
/// there is no partial profile.
pub async fn analyze_reviews<A: Ai + ?Sized>(
    ai: &A,
    config: &SearchConfig,
    reviews: &[String],
) -> Result<SentimentProfile> {
    if reviews.is_empty() {
        return Err(InsightError::validation("no reviews to analyze"));
    }

    let mut profile = SentimentProfile::new();
    for review in reviews {
        let truncated = truncate_chars(review, config.sentiment_review_chars);
        let classification = ai.classify(truncated).await?;
        let label = SentimentLabel::from_model_label(&classification.label);
        profile.record(label, classification.score);
    }

    debug!(
        positive = profile.positive,
        negative = profile.negative,
        neutral = profile.neutral,
        "sentiment analysis complete"
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAi;

    fn reviews(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_buckets_and_counts() {
        let ai = MockAi::new()
            .with_classification("Terrible battery.", "negative", 0.95)
            .with_classification("It works.", "neutral", 0.6);
        let config = SearchConfig::default();

        let profile = analyze_reviews(
            &ai,
            &config,
            &reviews(&["Terrible battery.", "It works.", "Love it!"]),
        )
        .await
        .unwrap();

        assert_eq!(profile.negative, 1);
        assert_eq!(profile.neutral, 1);
        assert_eq!(profile.positive, 1);
        assert_eq!(profile.review_count(), 3);
        assert_eq!(profile.scores.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_reviews_rejected() {
        let ai = MockAi::new();
        let config = SearchConfig::default();

        let err = analyze_reviews(&ai, &config, &[]).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(ai.calls().is_empty());
    }

    #[tokio::test]
    async fn test_long_reviews_truncated_before_classify() {
        let ai = MockAi::new();
        let config = SearchConfig::default();
        let long_review = "a".repeat(5000);

        analyze_reviews(&ai, &config, &reviews(&[&long_review]))
            .await
            .unwrap();

        let calls = ai.calls();
        let classified = calls
            .iter()
            .find_map(|c| c.classify_text())
            .expect("one classify call");
        assert_eq!(classified.chars().count(), config.sentiment_review_chars);
    }

    #[tokio::test]
    async fn test_classification_failure_aborts_batch() {
        let ai = MockAi::new().with_classify_failure();
        let config = SearchConfig::default();

        let err = analyze_reviews(&ai, &config, &reviews(&["one", "two"]))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
