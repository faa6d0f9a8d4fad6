//! Typed errors for the insight library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. A single boundary mapping
//! (`InsightError::status_code`) converts errors into transport-level
//! status classes for whatever web layer sits on top.

use thiserror::Error;

/// Errors that can occur during search and retrieval operations.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Bad or missing input (invalid URL, empty review list, ...)
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// Scrape adapter failed
    #[error("scrape failed: {0}")]
    Scrape(#[from] ScrapeError),

    /// AI capability (classify/generate/embed) unavailable or failed
    #[error("service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Requested entity does not exist
    #[error("not found: {what}")]
    NotFound { what: String },

    /// Unique constraint violated (duplicate username)
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Credentials did not match
    #[error("invalid credentials")]
    Unauthorized,

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl InsightError {
    /// Create a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a service error from a message.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into().into())
    }

    /// HTTP-equivalent status class for this error.
    ///
    /// The web layer is excluded from this library; this mapping is the
    /// contract it consumes.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } | Self::Scrape(_) => 400,
            Self::Unauthorized => 401,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Service(_) | Self::Storage(_) => 500,
        }
    }

    /// User-safe message for this error.
    ///
    /// 500-class errors return a generic message; the full detail goes to
    /// server-side logs only.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service(_) | Self::Storage(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors reported by the scrape adapter.
///
/// DOM traversal itself lives behind the [`Scraper`](crate::traits::Scraper)
/// trait; these variants are the structured failure reasons it may return.
/// Messages never leak selector detail.
#[derive(Debug, Clone, Error)]
pub enum ScrapeError {
    /// URL points at a site the adapter cannot handle
    #[error("unsupported site: {url}")]
    UnsupportedSite { url: String },

    /// Navigation or selector wait timed out
    #[error("timeout scraping: {url}")]
    Timeout { url: String },

    /// Primary content container never loaded
    #[error("missing content: {url}")]
    MissingContent { url: String },

    /// Navigation-level failure (network, bot detection)
    #[error("navigation failed: {0}")]
    Navigation(String),
}

/// Result type alias for insight operations.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Result type alias for scrape operations.
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;
