//! Error Types for Data Sources

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{name} unavailable: {reason}")]
    Unavailable { name: String, reason: String },

    #[error("No data feed for pair {0}")]
    UnsupportedPair(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SourceError {
    /// Flag an arbitrary failure as a named source being unavailable
    pub fn unavailable(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        SourceError::Unavailable {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
