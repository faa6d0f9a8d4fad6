//! Test doubles for the external collaborators.
//!
//! `MockAi` and `MockScraper` implement the capability traits with
//! canned fixtures plus call recording, so pipeline and service tests can
//! assert on both outputs and interactions without touching the network.
//! Both are cheap to clone; clones share fixtures and the call log, so a
//! test can hand one clone to a service and keep another for assertions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::{InsightError, Result, ScrapeError, ScrapeResult};
use crate::traits::ai::{Ai, Classification};
use crate::traits::scraper::Scraper;
use crate::types::product::ScrapedProduct;

/// One recorded call against [`MockAi`].
#[derive(Debug, Clone)]
pub enum MockAiCall {
    Classify { text: String },
    Generate { prompt: String, max_tokens: u32, temperature: f32 },
    Embed { text: String },
}

impl MockAiCall {
    /// The classified text, if this call was a classification.
    pub fn classify_text(&self) -> Option<&str> {
        match self {
            Self::Classify { text } => Some(text),
            _ => None,
        }
    }

    /// The generation prompt, if this call was a generation.
    pub fn generate_prompt(&self) -> Option<&str> {
        match self {
            Self::Generate { prompt, .. } => Some(prompt),
            _ => None,
        }
    }

    /// The embedded text, if this call was an embedding.
    pub fn embed_text(&self) -> Option<&str> {
        match self {
            Self::Embed { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct MockAiState {
    classifications: HashMap<String, Classification>,
    completions: Vec<String>,
    embedding_dim: usize,
    fail_classify: bool,
    fail_generate: bool,
    fail_embed: bool,
    calls: Vec<MockAiCall>,
}

/// Mock AI with canned classifications, a completion queue, and
/// deterministic content-addressed embeddings.
#[derive(Clone)]
pub struct MockAi {
    state: Arc<RwLock<MockAiState>>,
}

impl Default for MockAi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAi {
    /// Create a mock that classifies everything positive, answers every
    /// generation with a stock sentence, and embeds into 8 dimensions.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockAiState {
                classifications: HashMap::new(),
                completions: Vec::new(),
                embedding_dim: 8,
                fail_classify: false,
                fail_generate: false,
                fail_embed: false,
                calls: Vec::new(),
            })),
        }
    }

    /// Fix the classification for one exact text.
    pub fn with_classification(self, text: impl Into<String>, label: &str, score: f32) -> Self {
        self.state
            .write()
            .expect("mock lock poisoned")
            .classifications
            .insert(text.into(), Classification::new(label, score));
        self
    }

    /// Queue a completion; queued completions are consumed in order, then
    /// the stock sentence takes over again.
    pub fn with_completion(self, text: impl Into<String>) -> Self {
        self.state
            .write()
            .expect("mock lock poisoned")
            .completions
            .push(text.into());
        self
    }

    /// Set the embedding dimensionality.
    pub fn with_embedding_dim(self, dim: usize) -> Self {
        self.state.write().expect("mock lock poisoned").embedding_dim = dim;
        self
    }

    /// Make every classification fail.
    pub fn with_classify_failure(self) -> Self {
        self.state.write().expect("mock lock poisoned").fail_classify = true;
        self
    }

    /// Make every generation fail.
    pub fn with_generate_failure(self) -> Self {
        self.state.write().expect("mock lock poisoned").fail_generate = true;
        self
    }

    /// Make every embedding fail.
    pub fn with_embed_failure(self) -> Self {
        self.state.write().expect("mock lock poisoned").fail_embed = true;
        self
    }

    /// Snapshot of all recorded calls, in order.
    pub fn calls(&self) -> Vec<MockAiCall> {
        self.state.read().expect("mock lock poisoned").calls.clone()
    }
}

#[async_trait]
impl Ai for MockAi {
    async fn classify(&self, text: &str) -> Result<Classification> {
        let mut state = self.state.write().expect("mock lock poisoned");
        state.calls.push(MockAiCall::Classify { text: text.to_string() });
        if state.fail_classify {
            return Err(InsightError::service("classification model unavailable"));
        }
        Ok(state
            .classifications
            .get(text)
            .cloned()
            .unwrap_or_else(|| Classification::new("positive", 0.9)))
    }

    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let mut state = self.state.write().expect("mock lock poisoned");
        state.calls.push(MockAiCall::Generate {
            prompt: prompt.to_string(),
            max_tokens,
            temperature,
        });
        if state.fail_generate {
            return Err(InsightError::service("generation model unavailable"));
        }
        if state.completions.is_empty() {
            Ok("Buyers describe a reliable product with minor complaints.".to_string())
        } else {
            Ok(state.completions.remove(0))
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut state = self.state.write().expect("mock lock poisoned");
        state.calls.push(MockAiCall::Embed { text: text.to_string() });
        if state.fail_embed {
            return Err(InsightError::service("embedding model unavailable"));
        }
        Ok(content_vector(text, state.embedding_dim))
    }
}

/// Deterministic pseudo-embedding derived from a SHA-256 digest of the
/// text. Distinct texts get distinct directions; identical texts always
/// get the identical vector. Components are offset above zero so the
/// vector is never all zeros.
fn content_vector(text: &str, dim: usize) -> Vec<f32> {
    let mut vector = Vec::with_capacity(dim);
    let mut block = 0u32;
    while vector.len() < dim {
        let mut hasher = Sha256::new();
        hasher.update(block.to_le_bytes());
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();
        for byte in digest.iter().take(dim - vector.len()) {
            vector.push(f32::from(*byte) / 255.0 + 0.01);
        }
        block += 1;
    }
    vector
}

#[derive(Default)]
struct MockScraperState {
    products: HashMap<String, ScrapedProduct>,
    failures: HashMap<String, ScrapeError>,
    calls: Vec<String>,
}

/// Mock scraper with per-URL products and failures, recording every
/// scraped URL so tests can assert on cache behavior.
#[derive(Clone, Default)]
pub struct MockScraper {
    state: Arc<RwLock<MockScraperState>>,
}

impl MockScraper {
    /// Create a mock that knows no URLs; every scrape fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the product returned for one URL.
    pub fn with_product(self, url: impl Into<String>, product: ScrapedProduct) -> Self {
        self.state
            .write()
            .expect("mock lock poisoned")
            .products
            .insert(url.into(), product);
        self
    }

    /// Fix the failure returned for one URL.
    pub fn with_failure(self, url: impl Into<String>, error: ScrapeError) -> Self {
        self.state
            .write()
            .expect("mock lock poisoned")
            .failures
            .insert(url.into(), error);
        self
    }

    /// All URLs scraped so far, in order.
    pub fn scraped_urls(&self) -> Vec<String> {
        self.state.read().expect("mock lock poisoned").calls.clone()
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn scrape(&self, url: &str) -> ScrapeResult<ScrapedProduct> {
        let mut state = self.state.write().expect("mock lock poisoned");
        state.calls.push(url.to_string());
        if let Some(error) = state.failures.get(url) {
            return Err(error.clone());
        }
        state
            .products
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::UnsupportedSite { url: url.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_ai_defaults() {
        let ai = MockAi::new();
        let classification = ai.classify("anything").await.unwrap();
        assert_eq!(classification.label, "positive");

        let vector = ai.embed("anything").await.unwrap();
        assert_eq!(vector.len(), 8);
        assert_eq!(vector, ai.embed("anything").await.unwrap());
        assert_ne!(vector, ai.embed("something else").await.unwrap());

        assert_eq!(ai.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_completion_queue_then_stock() {
        let ai = MockAi::new().with_completion("first").with_completion("second");
        assert_eq!(ai.generate("p", 10, 0.0).await.unwrap(), "first");
        assert_eq!(ai.generate("p", 10, 0.0).await.unwrap(), "second");
        // Queue exhausted: stock sentence.
        assert!(ai.generate("p", 10, 0.0).await.unwrap().contains("Buyers"));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let ai = MockAi::new();
        let clone = ai.clone();
        clone.classify("text").await.unwrap();
        assert_eq!(ai.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_scraper_records_urls() {
        let scraper = MockScraper::new();
        let err = scraper.scrape("https://x.example/dp/B000000000").await.unwrap_err();
        assert!(matches!(err, ScrapeError::UnsupportedSite { .. }));
        assert_eq!(scraper.scraped_urls().len(), 1);
    }
}
