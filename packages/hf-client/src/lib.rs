//! Pure Hugging Face Inference API client
//!
//! A clean, minimal client for the Hugging Face Inference API with no
//! domain-specific logic. Supports chat completions, text classification,
//! and feature extraction (embeddings).
//!
//! # Example
//!
//! ```rust,ignore
//! use hf_client::{HfClient, ChatRequest, Message};
//!
//! let client = HfClient::from_env()?;
//!
//! // Chat completion
//! let response = client.chat_completion(
//!     ChatRequest::new("mistralai/Mistral-7B-Instruct-v0.3")
//!         .message(Message::user("Hello!"))
//!         .max_tokens(500),
//! ).await?;
//!
//! // Classification
//! let labels = client
//!     .text_classification("cardiffnlp/twitter-roberta-base-sentiment", "great product")
//!     .await?;
//!
//! // Embeddings
//! let vectors = client
//!     .feature_extraction("thenlper/gte-small", &["text to embed"])
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{HfError, Result};
pub use types::*;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Default base URL for task-style inference endpoints.
const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

/// Default base URL for the OpenAI-compatible chat router.
const DEFAULT_ROUTER_URL: &str = "https://router.huggingface.co/v1";

/// Pure Hugging Face Inference API client.
#[derive(Clone)]
pub struct HfClient {
    http_client: Client,
    api_token: String,
    inference_url: String,
    router_url: String,
}

impl HfClient {
    /// Create a new client with the given API token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_token: api_token.into(),
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            router_url: DEFAULT_ROUTER_URL.to_string(),
        }
    }

    /// Create from environment variable `HF_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("HF_TOKEN")
            .map_err(|_| HfError::Config("HF_TOKEN not set".into()))?;
        Ok(Self::new(api_token))
    }

    /// Set a custom inference base URL (for private endpoints, proxies).
    pub fn with_inference_url(mut self, url: impl Into<String>) -> Self {
        self.inference_url = url.into();
        self
    }

    /// Set a custom chat router base URL.
    pub fn with_router_url(mut self, url: impl Into<String>) -> Self {
        self.router_url = url.into();
        self
    }

    /// Get the API token.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    // =========================================================================
    // Chat Completion
    // =========================================================================

    /// Create a chat completion via the OpenAI-compatible router.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        debug!(model = %request.model, "chat completion request");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.router_url))
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| HfError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HfError::Api(format!("{}: {}", status, body)));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| HfError::Parse(e.to_string()))
    }

    // =========================================================================
    // Text Classification
    // =========================================================================

    /// Classify a single text, returning label/score pairs sorted by the model.
    ///
    /// The API returns either a flat list of results or a list-per-input;
    /// both shapes are handled.
    pub async fn text_classification(
        &self,
        model: &str,
        text: &str,
    ) -> Result<Vec<ClassificationResult>> {
        debug!(model, text_len = text.len(), "text classification request");

        let value = self
            .post_inference(model, &InferenceRequest::new(text))
            .await?;

        // [[{label, score}, ...]] for single input, or [{label, score}, ...]
        match &value {
            Value::Array(items) if items.first().map(Value::is_array).unwrap_or(false) => {
                serde_json::from_value(items[0].clone()).map_err(|e| HfError::Parse(e.to_string()))
            }
            _ => serde_json::from_value(value).map_err(|e| HfError::Parse(e.to_string())),
        }
    }

    // =========================================================================
    // Feature Extraction
    // =========================================================================

    /// Generate embedding vectors for a batch of texts.
    pub async fn feature_extraction(&self, model: &str, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        debug!(model, batch = texts.len(), "feature extraction request");

        let value = self
            .post_inference(model, &InferenceRequest::new(texts))
            .await?;

        serde_json::from_value(value).map_err(|e| HfError::Parse(e.to_string()))
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// POST to a task-style inference endpoint and return the raw JSON.
    async fn post_inference<T: serde::Serialize>(
        &self,
        model: &str,
        request: &InferenceRequest<T>,
    ) -> Result<Value> {
        let response = self
            .http_client
            .post(format!("{}/{}", self.inference_url, model))
            .bearer_auth(&self.api_token)
            .json(request)
            .send()
            .await
            .map_err(|e| HfError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HfError::Api(format!("{}: {}", status, body)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| HfError::Parse(e.to_string()))
    }
}
