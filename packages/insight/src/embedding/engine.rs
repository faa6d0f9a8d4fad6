//! Document and query embedding.
//!
//! Wraps input texts, splits them into bounded chunks, deduplicates by
//! exact text across the whole batch (first occurrence wins), embeds the
//! survivors, and normalizes every vector to unit length so downstream
//! similarity search can use a plain dot product as cosine similarity.

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::error::{InsightError, Result};
use crate::traits::ai::Ai;
use crate::types::document::EmbeddedDocument;

use super::splitter::TextSplitter;

/// Embed a batch of texts into deduplicated documents.
///
/// Chunking and deduplication are deterministic for identical input;
/// vector values depend only on the embedding model.
pub async fn embed_documents<A: Ai + ?Sized>(
    ai: &A,
    splitter: &TextSplitter,
    texts: &[String],
) -> Result<Vec<EmbeddedDocument>> {
    // Batch-wide dedup, insertion-ordered: the first occurrence of a
    // chunk's text wins regardless of which source string spawned it.
    let mut unique: IndexSet<String> = IndexSet::new();
    for text in texts {
        for chunk in splitter.split(text) {
            unique.insert(chunk);
        }
    }

    if unique.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_refs: Vec<&str> = unique.iter().map(String::as_str).collect();
    let vectors = ai.embed_batch(&chunk_refs).await?;

    if vectors.len() != chunk_refs.len() {
        return Err(InsightError::service(format!(
            "embedding count mismatch: {} chunks, {} vectors",
            chunk_refs.len(),
            vectors.len()
        )));
    }

    let mut documents = Vec::with_capacity(unique.len());
    for (text, vector) in unique.into_iter().zip(vectors) {
        let Some(vector) = normalize(vector) else {
            // Zero or empty vector: the model gave us nothing usable.
            warn!(chunk_len = text.len(), "dropping chunk with unusable vector");
            continue;
        };
        documents.push(EmbeddedDocument::new(text, vector));
    }

    debug!(documents = documents.len(), "embedded document batch");
    Ok(documents)
}

/// Embed a single query string into a normalized vector, no chunking.
pub async fn embed_query<A: Ai + ?Sized>(ai: &A, text: &str) -> Result<Vec<f32>> {
    let vector = ai.embed(text).await?;
    normalize(vector).ok_or_else(|| InsightError::service("query embedding was empty"))
}

/// Scale a vector to unit length; `None` for empty or zero vectors.
pub fn normalize(vector: Vec<f32>) -> Option<Vec<f32>> {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    Some(vector.into_iter().map(|x| x / norm).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAi;

    #[test]
    fn test_normalize() {
        let v = normalize(vec![3.0, 4.0]).unwrap();
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        assert!(normalize(vec![0.0, 0.0]).is_none());
        assert!(normalize(vec![]).is_none());
    }

    #[tokio::test]
    async fn test_embed_documents_dedups_across_batch() {
        let ai = MockAi::new();
        let splitter = TextSplitter::new(512);
        let texts = vec![
            "Solid build quality".to_string(),
            "Battery lasts all day".to_string(),
            "Solid build quality".to_string(),
        ];

        let docs = embed_documents(&ai, &splitter, &texts).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text, "Solid build quality");
        assert_eq!(docs[1].text, "Battery lasts all day");
    }

    #[tokio::test]
    async fn test_embed_documents_vectors_are_unit_length() {
        let ai = MockAi::new().with_embedding_dim(16);
        let splitter = TextSplitter::new(512);
        let texts = vec!["one".to_string(), "two".to_string(), "three".to_string()];

        let docs = embed_documents(&ai, &splitter, &texts).await.unwrap();
        assert_eq!(docs.len(), 3);
        for doc in &docs {
            assert_eq!(doc.dimension(), 16);
            assert!(doc.is_unit_length(1e-5));
        }
    }

    #[tokio::test]
    async fn test_embed_documents_deterministic_chunks() {
        let ai = MockAi::new();
        let splitter = TextSplitter::new(8);
        let texts = vec![
            "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu".to_string(),
        ];

        let first = embed_documents(&ai, &splitter, &texts).await.unwrap();
        let second = embed_documents(&ai, &splitter, &texts).await.unwrap();
        let first_texts: Vec<_> = first.iter().map(|d| &d.text).collect();
        let second_texts: Vec<_> = second.iter().map(|d| &d.text).collect();
        assert_eq!(first_texts, second_texts);
    }

    #[tokio::test]
    async fn test_embed_documents_empty_input() {
        let ai = MockAi::new();
        let splitter = TextSplitter::new(512);

        let docs = embed_documents(&ai, &splitter, &[]).await.unwrap();
        assert!(docs.is_empty());
        // The model is never called for an empty batch.
        assert!(ai.calls().is_empty());
    }

    #[tokio::test]
    async fn test_embed_query_normalized() {
        let ai = MockAi::new();
        let vector = embed_query(&ai, "does the battery last?").await.unwrap();
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}
