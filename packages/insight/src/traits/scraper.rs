//! Scraper trait for the page-scraping adapter.
//!
//! DOM traversal is site-specific and fragile; the core only sees this
//! capability interface. Implementations should carry finite timeouts on
//! every wait and treat a missing field as recoverable, failing hard only
//! when the primary content container never loads.

use async_trait::async_trait;

use crate::error::ScrapeResult;
use crate::types::product::ScrapedProduct;

/// Scrape adapter: given a URL, return product facts plus raw reviews,
/// or a structured failure reason.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Scrape one product page.
    ///
    /// A success may still carry best-effort partial facts (empty fields)
    /// and an empty review list; the pipeline decides what is fatal.
    async fn scrape(&self, url: &str) -> ScrapeResult<ScrapedProduct>;
}
