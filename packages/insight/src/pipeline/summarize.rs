//! Review summarization stage.

use tracing::debug;

use crate::error::{InsightError, Result};
use crate::traits::ai::Ai;
use crate::types::config::SearchConfig;
use crate::types::summary::ReviewSummary;

use super::truncate_chars;

/// Summarize the first `summary_review_limit` reviews into a short
/// abstractive digest.
///
/// Each review is truncated to the configured character budget and fed to
/// the generator as one bullet. The recorded review count is the number
/// actually summarized, not the total scraped.
pub async fn summarize_reviews<A: Ai + ?Sized>(
    ai: &A,
    config: &SearchConfig,
    reviews: &[String],
) -> Result<ReviewSummary> {
    if reviews.is_empty() {
        return Err(InsightError::validation("no reviews to summarize"));
    }

    let selected: Vec<&str> = reviews
        .iter()
        .take(config.summary_review_limit)
        .map(|r| truncate_chars(r, config.summary_review_chars))
        .collect();

    let mut prompt = String::from(
        "Summarize the following product reviews in a single short paragraph. \
         Mention what buyers praise, what they criticize, and the overall \
         sentiment. Write in the third person and do not address the reader.\n\n\
         Reviews:\n",
    );
    for review in &selected {
        prompt.push_str("- ");
        prompt.push_str(review);
        prompt.push('\n');
    }

    let raw = ai
        .generate(&prompt, config.summary_max_tokens, config.summary_temperature)
        .await?;

    // Double quotes break naive JSON templating in downstream consumers.
    let summary_text = raw.trim().replace('"', "'");

    debug!(
        reviews = selected.len(),
        words = summary_text.split_whitespace().count(),
        "summary generated"
    );
    Ok(ReviewSummary::new(summary_text, selected.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAi;

    fn reviews(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("review number {i}")).collect()
    }

    #[tokio::test]
    async fn test_summary_counts_selected_reviews() {
        let ai = MockAi::new().with_completion("Buyers mostly like it.");
        let config = SearchConfig::default();

        let summary = summarize_reviews(&ai, &config, &reviews(3)).await.unwrap();
        assert_eq!(summary.summary_text, "Buyers mostly like it.");
        assert_eq!(summary.review_count, 3);
        assert_eq!(summary.word_count, 4);
    }

    #[tokio::test]
    async fn test_review_count_caps_at_limit() {
        let ai = MockAi::new();
        let config = SearchConfig::default();

        let summary = summarize_reviews(&ai, &config, &reviews(35)).await.unwrap();
        assert_eq!(summary.review_count, config.summary_review_limit);

        // Only the first `summary_review_limit` reviews reach the prompt.
        let calls = ai.calls();
        let prompt = calls
            .iter()
            .find_map(|c| c.generate_prompt())
            .expect("one generate call");
        assert!(prompt.contains("review number 19"));
        assert!(!prompt.contains("review number 20"));
    }

    #[tokio::test]
    async fn test_double_quotes_replaced() {
        let ai = MockAi::new().with_completion(r#"Reviewers call it "great"."#);
        let config = SearchConfig::default();

        let summary = summarize_reviews(&ai, &config, &reviews(1)).await.unwrap();
        assert_eq!(summary.summary_text, "Reviewers call it 'great'.");
    }

    #[tokio::test]
    async fn test_empty_reviews_rejected() {
        let ai = MockAi::new();
        let config = SearchConfig::default();

        let err = summarize_reviews(&ai, &config, &[]).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(ai.calls().is_empty());
    }
}
