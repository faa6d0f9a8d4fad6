//! Search pipeline orchestrator.

use tracing::{info, instrument};

use crate::embedding::{embed_documents, TextSplitter};
use crate::error::{InsightError, Result};
use crate::traits::ai::Ai;
use crate::traits::scraper::Scraper;
use crate::types::config::SearchConfig;
use crate::types::document::EmbeddedDocument;
use crate::types::product::ProductFacts;
use crate::types::sentiment::SentimentProfile;
use crate::types::summary::ReviewSummary;

use super::sentiment::analyze_reviews;
use super::summarize::summarize_reviews;

/// Everything one successful pipeline run produces.
///
/// Constructed only when every stage has succeeded; callers persist it
/// atomically or not at all.
#[derive(Debug, Clone)]
pub struct SearchOutput {
    /// Scraped product facts including about bullets
    pub product_details: ProductFacts,

    /// Abstractive review summary
    pub review_summary: ReviewSummary,

    /// Aggregated sentiment profile
    pub sentiment_summary: SentimentProfile,

    /// Embedded chunks for later question answering
    pub info_docs: Vec<EmbeddedDocument>,
}

/// Run the full pipeline for one product URL: scrape, analyze sentiment,
/// summarize, and embed.
///
/// Sentiment and summarization both read the scraped reviews and run
/// concurrently; if both fail, the sentiment error is reported. The
/// embedding stage runs last over the combined fact-and-review corpus.
#[instrument(skip(scraper, ai, config), fields(url = %url))]
pub async fn execute_search<S, A>(
    scraper: &S,
    ai: &A,
    config: &SearchConfig,
    url: &str,
) -> Result<SearchOutput>
where
    S: Scraper + ?Sized,
    A: Ai + ?Sized,
{
    let scraped = scraper.scrape(url).await?;
    info!(reviews = scraped.reviews.len(), "scrape complete");

    if scraped.reviews.is_empty() {
        return Err(InsightError::validation(
            "No reviews found for this product",
        ));
    }
    if scraped.facts.about.is_empty() {
        return Err(InsightError::validation(
            "No product description found for this product",
        ));
    }

    let (sentiment, summary) = futures::join!(
        analyze_reviews(ai, config, &scraped.reviews),
        summarize_reviews(ai, config, &scraped.reviews),
    );
    let sentiment_summary = sentiment?;
    let review_summary = summary?;
    info!(
        classified = sentiment_summary.review_count(),
        summarized = review_summary.review_count,
        "analysis complete"
    );

    let corpus = build_corpus(&scraped.facts, &scraped.reviews);
    let splitter = TextSplitter::new(config.chunk_size_tokens);
    let info_docs = embed_documents(ai, &splitter, &corpus).await?;
    if info_docs.is_empty() {
        return Err(InsightError::validation(
            "product content produced no indexable text",
        ));
    }
    info!(documents = info_docs.len(), "embedding complete");

    Ok(SearchOutput {
        product_details: scraped.facts,
        review_summary,
        sentiment_summary,
        info_docs,
    })
}

/// Assemble the retrieval corpus: about bullets, reviews, and labeled
/// product facts, in that order.
fn build_corpus(facts: &ProductFacts, reviews: &[String]) -> Vec<String> {
    let mut corpus = Vec::with_capacity(facts.about.len() + reviews.len() + 4);
    corpus.extend(facts.about.iter().cloned());
    corpus.extend(reviews.iter().cloned());
    corpus.push(format!("name : {}", facts.name));
    corpus.push(format!("price : {}", facts.price));
    corpus.push(format!("Rating : {}", facts.rating));
    corpus.push(format!("Image link : {}", facts.image));
    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAi, MockScraper};
    use crate::types::product::ScrapedProduct;

    fn scraped(reviews: &[&str]) -> ScrapedProduct {
        ScrapedProduct {
            facts: ProductFacts::new("Widget", "https://img.example/w.jpg", "$19.99", "4.3")
                .with_about(vec![
                    "Durable housing".to_string(),
                    "Two-year warranty".to_string(),
                ]),
            reviews: reviews.iter().map(|r| r.to_string()).collect(),
        }
    }

    const URL: &str = "https://amazon.example/dp/B000000000";

    #[tokio::test]
    async fn test_full_run_produces_all_outputs() {
        let scraper = MockScraper::new().with_product(URL, scraped(&["Great!", "Broke fast."]));
        let ai = MockAi::new().with_classification("Broke fast.", "negative", 0.9);
        let config = SearchConfig::default();

        let output = execute_search(&scraper, &ai, &config, URL).await.unwrap();
        assert_eq!(output.product_details.name, "Widget");
        assert_eq!(output.sentiment_summary.review_count(), 2);
        assert_eq!(output.sentiment_summary.negative, 1);
        assert_eq!(output.review_summary.review_count, 2);
        assert!(!output.info_docs.is_empty());

        // Labeled facts make it into the retrieval corpus.
        assert!(output.info_docs.iter().any(|d| d.text == "name : Widget"));
        assert!(output.info_docs.iter().any(|d| d.text == "price : $19.99"));
    }

    #[tokio::test]
    async fn test_no_reviews_rejected_before_any_model_call() {
        let scraper = MockScraper::new().with_product(URL, scraped(&[]));
        let ai = MockAi::new();
        let config = SearchConfig::default();

        let err = execute_search(&scraper, &ai, &config, URL)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("No reviews found"));
        assert!(ai.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_about_rejected() {
        let mut product = scraped(&["Fine."]);
        product.facts.about.clear();
        let scraper = MockScraper::new().with_product(URL, product);
        let ai = MockAi::new();
        let config = SearchConfig::default();

        let err = execute_search(&scraper, &ai, &config, URL)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(ai.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sentiment_error_wins_when_both_stages_fail() {
        let scraper = MockScraper::new().with_product(URL, scraped(&["Fine."]));
        let ai = MockAi::new().with_classify_failure().with_generate_failure();
        let config = SearchConfig::default();

        let err = execute_search(&scraper, &ai, &config, URL)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("classification"));
    }

    #[tokio::test]
    async fn test_scrape_failure_propagates_as_400() {
        let scraper = MockScraper::new(); // knows no URLs
        let ai = MockAi::new();
        let config = SearchConfig::default();

        let err = execute_search(&scraper, &ai, &config, URL)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(ai.calls().is_empty());
    }
}
