//! AI trait for externally-hosted model capabilities.
//!
//! The trait abstracts the hosted models the library consumes:
//! - Sentiment classification
//! - Text generation (summaries, grounded answers)
//! - Embedding generation

use async_trait::async_trait;

use crate::error::Result;

/// Label and confidence returned by a classification model.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Raw model label (e.g., "negative", "LABEL_2")
    pub label: String,

    /// Confidence score in [0, 1]
    pub score: f32,
}

impl Classification {
    /// Create a new classification.
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// AI trait for hosted model operations.
///
/// Implementations wrap specific providers and handle the specifics of
/// request shaping and response parsing. Clients and tokenizers should be
/// constructed once per process and reused, never per request.
#[async_trait]
pub trait Ai: Send + Sync {
    /// Classify one text, returning the top label with its score.
    async fn classify(&self, text: &str) -> Result<Classification>;

    /// Generate text from a prompt with a bounded budget.
    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;

    /// Generate an embedding for one text.
    ///
    /// Vectors are not assumed normalized; the embedding engine
    /// normalizes before storage and comparison.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts (batch operation).
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        // Default implementation calls embed sequentially
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }
}
