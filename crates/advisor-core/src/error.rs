//! Error Types

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Advisor error types
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Language model returned an error response
    #[error("Model error: {0}")]
    Model(String),

    /// Language model unreachable or returned an unparseable body
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// A data source failed; recovered with a fallback constant upstream
    #[error("Source unavailable: {name}: {reason}")]
    SourceUnavailable { name: String, reason: String },

    /// Unexpected failure inside the compose pipeline
    #[error("Composition failed: {0}")]
    Composition(String),

    /// Session error
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AdvisorError {
    /// Whether a retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AdvisorError::ModelUnavailable(_)
                | AdvisorError::SourceUnavailable { .. }
                | AdvisorError::Io(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AdvisorError::Model(msg) => {
                format!("The AI service encountered an error: {}", msg)
            }
            AdvisorError::ModelUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            AdvisorError::SourceUnavailable { name, .. } => {
                format!("Live data from {} is temporarily unavailable.", name)
            }
            AdvisorError::Session(msg) => format!("Session error: {}", msg),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for AdvisorError {
    fn from(err: anyhow::Error) -> Self {
        AdvisorError::Other(err.to_string())
    }
}
