//! Hugging Face Inference API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat Completion
// =============================================================================

/// Chat completion request (OpenAI-compatible router endpoint).
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "mistralai/Mistral-7B-Instruct-v0.3")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in the completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices (usually one)
    pub choices: Vec<ChatChoice>,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatResponseMessage,
}

/// Message inside a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    /// Generated content
    pub content: String,
}

// =============================================================================
// Text Classification
// =============================================================================

/// One label/score pair returned by a classification model.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationResult {
    /// Label assigned by the model (e.g., "LABEL_0", "negative")
    pub label: String,

    /// Confidence score in [0, 1]
    pub score: f32,
}

/// Request body for task-style inference endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<T: Serialize> {
    /// Model inputs (a string or list of strings depending on the task)
    pub inputs: T,
}

impl<T: Serialize> InferenceRequest<T> {
    /// Create a new inference request.
    pub fn new(inputs: T) -> Self {
        Self { inputs }
    }
}
