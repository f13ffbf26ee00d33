//! # advisor-llm
//!
//! Gemini-backed implementation of the `LanguageModel` trait, plus the
//! plain-text post-processing and the canned fallback table the composer
//! reaches for when the model is unavailable.

pub mod fallback;
pub mod gemini;
pub mod markdown;

pub use gemini::{GeminiClient, GeminiConfig};

// Re-export core types for convenience
pub use advisor_core::{AdvisorError, LanguageModel, Result};
