//! Hugging Face implementation of the [`Ai`] trait.
//!
//! Wires the three hosted models the pipeline depends on: a sentiment
//! classifier, an instruct model for generation, and an embedding model.
//! Construct once and reuse; the underlying HTTP client pools
//! connections.

use async_trait::async_trait;
use hf_client::{ChatRequest, HfClient, Message};
use tracing::warn;

use crate::error::{InsightError, Result};
use crate::traits::ai::{Ai, Classification};

const DEFAULT_SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment";
const DEFAULT_CHAT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
const DEFAULT_EMBEDDING_MODEL: &str = "thenlper/gte-small";

/// [`Ai`] provider backed by the Hugging Face Inference API.
#[derive(Clone)]
pub struct HuggingFaceAi {
    client: HfClient,
    sentiment_model: String,
    chat_model: String,
    embedding_model: String,
}

impl HuggingFaceAi {
    /// Create a provider with the default models.
    pub fn new(client: HfClient) -> Self {
        Self {
            client,
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }

    /// Create from the `HF_TOKEN` environment variable.
    pub fn from_env() -> Result<Self> {
        let client = HfClient::from_env().map_err(into_service_error)?;
        Ok(Self::new(client))
    }

    /// Override the sentiment model.
    pub fn with_sentiment_model(mut self, model: impl Into<String>) -> Self {
        self.sentiment_model = model.into();
        self
    }

    /// Override the chat model.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Override the embedding model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }
}

fn into_service_error(err: hf_client::HfError) -> InsightError {
    InsightError::Service(Box::new(err))
}

#[async_trait]
impl Ai for HuggingFaceAi {
    async fn classify(&self, text: &str) -> Result<Classification> {
        let results = self
            .client
            .text_classification(&self.sentiment_model, text)
            .await
            .map_err(into_service_error)?;

        // Results come back sorted by score; the head is the prediction.
        let top = results
            .into_iter()
            .next()
            .ok_or_else(|| InsightError::service("classifier returned no labels"))?;
        Ok(Classification::new(top.label, top.score))
    }

    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let response = self
            .client
            .chat_completion(
                ChatRequest::new(&self.chat_model)
                    .message(Message::user(prompt))
                    .max_tokens(max_tokens)
                    .temperature(temperature),
            )
            .await
            .map_err(into_service_error)?;

        response
            .content()
            .map(str::to_string)
            .ok_or_else(|| InsightError::service("chat completion had no choices"))
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| InsightError::service("embedding endpoint returned no vector"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let vectors = self
            .client
            .feature_extraction(&self.embedding_model, texts)
            .await
            .map_err(into_service_error)?;

        if vectors.len() != texts.len() {
            warn!(
                requested = texts.len(),
                returned = vectors.len(),
                "embedding batch size mismatch"
            );
        }
        Ok(vectors)
    }
}
