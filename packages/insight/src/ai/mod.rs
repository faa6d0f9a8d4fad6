//! AI provider implementations (feature-gated).

pub mod huggingface;

pub use huggingface::HuggingFaceAi;
