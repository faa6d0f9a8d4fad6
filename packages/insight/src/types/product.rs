//! Product types and product-id extraction.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{InsightError, Result};

/// Structured facts about one product, produced once per successful scrape
/// and immutable thereafter.
///
/// Price and rating stay as strings: the adapter returns whatever the page
/// displays, currency and locale unparsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFacts {
    /// Product name
    pub name: String,

    /// Product image URL
    pub image: String,

    /// Displayed price, currency-unparsed
    pub price: String,

    /// Displayed rating
    pub rating: String,

    /// Ordered "about this item" bullets
    #[serde(default)]
    pub about: Vec<String>,
}

impl ProductFacts {
    /// Create product facts without about bullets.
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        price: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            price: price.into(),
            rating: rating.into(),
            about: Vec::new(),
        }
    }

    /// Set the about bullets.
    pub fn with_about(mut self, about: Vec<String>) -> Self {
        self.about = about;
        self
    }
}

/// Everything the scrape adapter returns for one URL.
///
/// Reviews keep their page order and are never deduplicated; an empty list
/// is valid here and rejected later by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedProduct {
    /// Product facts including about bullets
    pub facts: ProductFacts,

    /// Ordered raw review texts
    pub reviews: Vec<String>,
}

/// Pattern for product ids: 10 uppercase alphanumerics after `/dp/`.
fn product_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/dp/([A-Z0-9]{10})").expect("valid product id pattern"))
}

/// Extract the product id from a product page URL, if present.
pub fn extract_product_id(url: &str) -> Option<String> {
    product_id_pattern()
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Validate a search URL and return its product id.
///
/// The URL must be http/https and must contain the product-id pattern.
/// Both checks run before any core logic or external call.
pub fn validate_search_url(url: &str) -> Result<String> {
    if url.trim().is_empty() {
        return Err(InsightError::validation("URL is required"));
    }

    let parsed = Url::parse(url)
        .map_err(|_| InsightError::validation(format!("invalid URL format: {url}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(InsightError::validation(format!(
                "unsupported URL scheme: {other}"
            )))
        }
    }

    extract_product_id(url)
        .ok_or_else(|| InsightError::validation("URL does not contain a product id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_product_id() {
        assert_eq!(
            extract_product_id("https://amazon.example/dp/B000000000"),
            Some("B000000000".to_string())
        );
        assert_eq!(
            extract_product_id("https://amazon.example/gp/product/X"),
            None
        );
        // Lowercase ids do not match
        assert_eq!(extract_product_id("https://amazon.example/dp/b000000000"), None);
        // Too short
        assert_eq!(extract_product_id("https://amazon.example/dp/B0000"), None);
    }

    #[test]
    fn test_validate_search_url() {
        assert_eq!(
            validate_search_url("https://amazon.example/dp/B07XJ8C8F5?th=1").unwrap(),
            "B07XJ8C8F5"
        );

        assert_eq!(validate_search_url("").unwrap_err().status_code(), 400);
        assert_eq!(
            validate_search_url("ftp://amazon.example/dp/B000000000")
                .unwrap_err()
                .status_code(),
            400
        );
        assert_eq!(
            validate_search_url("https://amazon.example/reviews")
                .unwrap_err()
                .status_code(),
            400
        );
    }
}
