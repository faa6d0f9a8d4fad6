//! Embedded document type.

use serde::{Deserialize, Serialize};

/// One deduplicated text chunk with its embedding vector.
///
/// Within the batch that produced it, `text` is unique and `vector` is
/// unit-length with the embedding model's fixed dimensionality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedDocument {
    /// Chunk text
    pub text: String,

    /// Normalized dense vector
    pub vector: Vec<f32>,
}

impl EmbeddedDocument {
    /// Create a new embedded document.
    pub fn new(text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            vector,
        }
    }

    /// Vector dimensionality.
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Whether the vector is unit-length within the given tolerance.
    pub fn is_unit_length(&self, tolerance: f32) -> bool {
        let norm: f32 = self.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        (norm - 1.0).abs() <= tolerance
    }
}
