//! Review summary types.

use serde::{Deserialize, Serialize};

/// Abstractive summary over one product's reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Generated summary text
    pub summary_text: String,

    /// Whitespace-token count of the summary
    pub word_count: usize,

    /// Number of reviews fed to the summarizer (capped at the input limit)
    pub review_count: usize,
}

impl ReviewSummary {
    /// Create a summary, deriving the word count from the text.
    pub fn new(summary_text: impl Into<String>, review_count: usize) -> Self {
        let summary_text = summary_text.into();
        let word_count = summary_text.split_whitespace().count();
        Self {
            summary_text,
            word_count,
            review_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        let summary = ReviewSummary::new("Buyers praise the  battery life.", 3);
        assert_eq!(summary.word_count, 5);
        assert_eq!(summary.review_count, 3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ReviewSummary::new("", 0);
        assert_eq!(summary.word_count, 0);
    }
}
