//! Embedding engine: chunking, deduplication, and vector generation.

pub mod engine;
pub mod splitter;

pub use engine::{embed_documents, embed_query, normalize};
pub use splitter::TextSplitter;
