//! Language Model Abstraction
//!
//! Defines the interface the composer uses to obtain natural-language
//! answers, keeping the engine independent of any specific model backend.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_core::provider::LanguageModel;
//!
//! let answer = model.generate("Explain staking in one paragraph").await?;
//! ```

use async_trait::async_trait;

use crate::error::Result;

/// Strategy trait for language model backends
///
/// Implementations return plain text: any presentation markup is stripped
/// before the answer leaves the client.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a plain-text answer for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is reachable and configured correctly
    async fn health_check(&self) -> bool {
        true
    }

    /// Backend name for logging and citations
    fn name(&self) -> &str;
}
