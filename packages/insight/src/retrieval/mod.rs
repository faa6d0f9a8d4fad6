//! Retrieval engine: nearest-neighbor search and grounded answering.
//!
//! Vectors are unit-length by the time they reach this module, so the dot
//! product is cosine similarity.

use tracing::debug;

use crate::embedding::embed_query;
use crate::error::Result;
use crate::traits::ai::Ai;
use crate::types::config::SearchConfig;
use crate::types::document::EmbeddedDocument;

/// Dot product over the shared prefix of two vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Top-k documents by similarity to the query vector, most similar first.
///
/// Ties keep the documents' insertion order; asking for more documents
/// than exist returns them all.
pub fn similarity_search<'a>(
    query: &[f32],
    documents: &'a [EmbeddedDocument],
    k: usize,
) -> Vec<(f32, &'a EmbeddedDocument)> {
    let mut scored: Vec<(f32, &EmbeddedDocument)> = documents
        .iter()
        .map(|doc| (dot(query, &doc.vector), doc))
        .collect();
    // Stable sort: equal scores keep insertion order.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(k);
    scored
}

/// Build the grounding prompt for one question over retrieved context.
pub fn build_answer_prompt(context: &[&str], question: &str) -> String {
    let mut prompt = String::from(
        "Answer the question using only the context below. If the context \
         does not contain the answer, politely decline and suggest asking \
         about the product's listed details instead. Never mention the \
         context or say that no information was found.\n\nContext:\n",
    );
    for text in context {
        prompt.push_str(text);
        prompt.push('\n');
    }
    prompt.push_str("\nQuestion: ");
    prompt.push_str(question);
    prompt.push_str("\nAnswer:");
    prompt
}

/// Answer a question grounded in the given documents.
///
/// Embeds the question, retrieves the `retrieval_k` most similar chunks,
/// and generates an answer constrained to that context.
pub async fn answer_question<A: Ai + ?Sized>(
    ai: &A,
    config: &SearchConfig,
    question: &str,
    documents: &[EmbeddedDocument],
) -> Result<String> {
    let query = embed_query(ai, question).await?;
    let hits = similarity_search(&query, documents, config.retrieval_k);
    debug!(retrieved = hits.len(), "similarity search complete");

    let context: Vec<&str> = hits.iter().map(|(_, doc)| doc.text.as_str()).collect();
    let prompt = build_answer_prompt(&context, question);
    let answer = ai
        .generate(&prompt, config.answer_max_tokens, config.answer_temperature)
        .await?;
    Ok(answer.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAi;
    use proptest::prelude::*;

    fn doc(text: &str, vector: Vec<f32>) -> EmbeddedDocument {
        EmbeddedDocument::new(text, vector)
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(dot(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
    }

    #[test]
    fn test_top_k_ordering() {
        let docs = vec![
            doc("far", vec![0.0, 1.0]),
            doc("near", vec![1.0, 0.0]),
            doc("mid", vec![0.707, 0.707]),
        ];

        let hits = similarity_search(&[1.0, 0.0], &docs, 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].1.text, "near");
        assert_eq!(hits[1].1.text, "mid");
    }

    #[test]
    fn test_k_larger_than_corpus_returns_all() {
        let docs = vec![doc("a", vec![1.0, 0.0]), doc("b", vec![0.0, 1.0])];
        let hits = similarity_search(&[1.0, 0.0], &docs, 7);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let docs = vec![
            doc("first", vec![1.0, 0.0]),
            doc("second", vec![1.0, 0.0]),
            doc("third", vec![1.0, 0.0]),
        ];
        let hits = similarity_search(&[1.0, 0.0], &docs, 2);
        assert_eq!(hits[0].1.text, "first");
        assert_eq!(hits[1].1.text, "second");
    }

    #[tokio::test]
    async fn test_answer_question_grounds_prompt_in_context() {
        let ai = MockAi::new().with_completion("The battery lasts about ten hours.");
        let config = SearchConfig::default();
        let docs = vec![
            doc("Battery lasts ten hours", vec![1.0, 0.0]),
            doc("Comes in three colors", vec![0.0, 1.0]),
        ];

        let answer = answer_question(&ai, &config, "How long does the battery last?", &docs)
            .await
            .unwrap();
        assert_eq!(answer, "The battery lasts about ten hours.");

        let calls = ai.calls();
        let prompt = calls
            .iter()
            .find_map(|c| c.generate_prompt())
            .expect("one generate call");
        assert!(prompt.contains("Battery lasts ten hours"));
        assert!(prompt.contains("How long does the battery last?"));
    }

    proptest! {
        #[test]
        fn prop_returns_min_of_k_and_len(
            vectors in proptest::collection::vec(
                proptest::collection::vec(-1.0f32..1.0, 3), 0..20),
            k in 0usize..10,
        ) {
            let docs: Vec<EmbeddedDocument> = vectors
                .into_iter()
                .enumerate()
                .map(|(i, v)| EmbeddedDocument::new(format!("d{i}"), v))
                .collect();
            let hits = similarity_search(&[1.0, 0.0, 0.0], &docs, k);
            prop_assert_eq!(hits.len(), k.min(docs.len()));
            // Scores are non-increasing.
            for pair in hits.windows(2) {
                prop_assert!(pair[0].0 >= pair[1].0);
            }
        }
    }
}
