//! Recent search types - one user's cached result for one product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::EmbeddedDocument;
use super::product::ProductFacts;
use super::sentiment::SentimentProfile;
use super::summary::ReviewSummary;

/// A fully-processed, cached search result for one product.
///
/// Created atomically once every pipeline stage has succeeded; a failed
/// run never persists a partial one. Owned exclusively by one user and
/// kept in a bounded FIFO list on their record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSearch {
    /// Product id derived from the URL
    pub product_id: String,

    /// The searched URL
    pub url: String,

    /// Scraped product facts with about bullets merged in
    pub product_details: ProductFacts,

    /// Abstractive review summary
    pub review_summary: ReviewSummary,

    /// Aggregated sentiment profile
    pub sentiment_summary: SentimentProfile,

    /// Embedded chunks for retrieval, inlined with the search
    pub info_docs: Vec<EmbeddedDocument>,

    /// When this search completed
    pub created_at: DateTime<Utc>,
}

impl RecentSearch {
    /// Create a new recent search stamped with the current time.
    pub fn new(
        product_id: impl Into<String>,
        url: impl Into<String>,
        product_details: ProductFacts,
        review_summary: ReviewSummary,
        sentiment_summary: SentimentProfile,
        info_docs: Vec<EmbeddedDocument>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            url: url.into(),
            product_details,
            review_summary,
            sentiment_summary,
            info_docs,
            created_at: Utc::now(),
        }
    }
}

/// Public projection of a [`RecentSearch`] - everything except the raw
/// embedded documents, which never leave the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSearchView {
    pub product_id: String,
    pub url: String,
    pub product_details: ProductFacts,
    pub summary_details: ReviewSummary,
    pub sentiment_details: SentimentProfile,
    pub created_at: DateTime<Utc>,
}

impl From<&RecentSearch> for RecentSearchView {
    fn from(search: &RecentSearch) -> Self {
        Self {
            product_id: search.product_id.clone(),
            url: search.url.clone(),
            product_details: search.product_details.clone(),
            summary_details: search.review_summary.clone(),
            sentiment_details: search.sentiment_summary.clone(),
            created_at: search.created_at,
        }
    }
}
