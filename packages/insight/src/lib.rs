//! Product Review Search and Retrieval Library
//!
//! Turns a product page URL into an analyzed, queryable search result:
//! scrape the page, classify review sentiment, summarize the reviews, and
//! embed the product content for later natural-language question
//! answering over the user's recent searches.
//!
//! # Design
//!
//! - External collaborators (scraper, hosted models, user store) sit
//!   behind capability traits; the core never does I/O directly
//! - The pipeline is all-or-nothing: a failed stage persists nothing
//! - Searches are idempotent per user and product id; repeat searches
//!   serve the cached result without scraping or model calls
//! - Vectors are normalized at creation, so retrieval is a plain
//!   dot-product top-k
//!
//! # Usage
//!
//! ```rust,ignore
//! use insight::{InsightService, MemoryStore, SearchConfig};
//! use insight::testing::{MockAi, MockScraper};
//!
//! let service = InsightService::new(scraper, ai, MemoryStore::new());
//!
//! service.register("alice", "correct horse").await?;
//! let result = service.search("alice", "https://amazon.example/dp/B07XJ8C8F5").await?;
//! let answer = service.answer("alice", &result.product_id, "Is it durable?").await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (Scraper, Ai, UserStore)
//! - [`types`] - Domain data types
//! - [`pipeline`] - Search pipeline (scrape, sentiment, summary, embed)
//! - [`embedding`] - Text splitting, deduplication, vector generation
//! - [`retrieval`] - Top-k similarity search and grounded answering
//! - [`stores`] - Storage implementations (MemoryStore)
//! - [`security`] - Password hashing
//! - [`testing`] - Mock implementations for testing

pub mod embedding;
pub mod error;
pub mod pipeline;
pub mod retrieval;
pub mod security;
pub mod service;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "huggingface")]
pub mod ai;

// Re-export core types at crate root
pub use error::{InsightError, Result, ScrapeError, ScrapeResult};
pub use traits::{
    ai::{Ai, Classification},
    scraper::Scraper,
    store::UserStore,
};
pub use types::{
    config::SearchConfig,
    document::EmbeddedDocument,
    product::{extract_product_id, validate_search_url, ProductFacts, ScrapedProduct},
    search::{RecentSearch, RecentSearchView},
    sentiment::{SentimentLabel, SentimentProfile},
    summary::ReviewSummary,
    user::UserRecord,
};

// Re-export the service facade and pipeline entry points
pub use pipeline::{analyze_reviews, execute_search, summarize_reviews, SearchOutput};
pub use retrieval::{answer_question, build_answer_prompt, similarity_search};
pub use service::InsightService;

// Re-export embedding components
pub use embedding::{embed_documents, embed_query, TextSplitter};

// Re-export stores
pub use stores::MemoryStore;

#[cfg(feature = "huggingface")]
pub use ai::HuggingFaceAi;

// Re-export testing utilities
pub use testing::{MockAi, MockScraper};
