//! Configuration for the search pipeline and retrieval engine.

use serde::{Deserialize, Serialize};

/// Tunable limits for one search/retrieval deployment.
///
/// Deployment-specific bounds (notably the recent-search cap) are
/// configuration here, not invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum recent searches kept per user (FIFO eviction beyond this)
    pub max_recent_searches: usize,

    /// Number of documents retrieved per question
    pub retrieval_k: usize,

    /// Chunk size bound in model tokens
    pub chunk_size_tokens: usize,

    /// Maximum reviews fed to the summarizer per call
    pub summary_review_limit: usize,

    /// Character budget per review for summarization
    pub summary_review_chars: usize,

    /// Generation budget for the summary
    pub summary_max_tokens: u32,

    /// Sampling temperature for the summary
    pub summary_temperature: f32,

    /// Character budget per review for sentiment classification
    pub sentiment_review_chars: usize,

    /// Generation budget for question answering
    pub answer_max_tokens: u32,

    /// Sampling temperature for question answering
    pub answer_temperature: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_recent_searches: 5,
            retrieval_k: 7,
            chunk_size_tokens: 512,
            summary_review_limit: 20,
            summary_review_chars: 500,
            summary_max_tokens: 250,
            summary_temperature: 0.5,
            sentiment_review_chars: 1000,
            answer_max_tokens: 500,
            answer_temperature: 0.3,
        }
    }
}

impl SearchConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recent-search cap.
    pub fn with_max_recent_searches(mut self, cap: usize) -> Self {
        self.max_recent_searches = cap;
        self
    }

    /// Set the retrieval k.
    pub fn with_retrieval_k(mut self, k: usize) -> Self {
        self.retrieval_k = k;
        self
    }

    /// Set the chunk size in tokens.
    pub fn with_chunk_size(mut self, tokens: usize) -> Self {
        self.chunk_size_tokens = tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.max_recent_searches, 5);
        assert_eq!(config.retrieval_k, 7);
        assert_eq!(config.chunk_size_tokens, 512);
        assert_eq!(config.summary_review_limit, 20);
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::new()
            .with_max_recent_searches(2)
            .with_retrieval_k(3);
        assert_eq!(config.max_recent_searches, 2);
        assert_eq!(config.retrieval_k, 3);
    }
}
