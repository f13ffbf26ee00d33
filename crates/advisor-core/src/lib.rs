//! # advisor-core
//!
//! Core conversational types for the DeFi advisor: messages and the
//! append-only transcript, the closed intent set, the per-request wallet
//! context, and the language-model abstraction.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Conversation Session                      │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │ Transcript  │  │   Composer   │  │   LanguageModel     │  │
//! │  │ (append-only)──│  (per Intent) │──│    (Strategy)       │  │
//! │  └─────────────┘  └──────────────┘  └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LanguageModel` trait lets the engine swap model backends without
//! changing composition logic.

pub mod context;
pub mod error;
pub mod intent;
pub mod message;
pub mod provider;

pub use context::ConversationContext;
pub use error::{AdvisorError, Result};
pub use intent::Intent;
pub use message::{Author, CitedSource, Message, SuggestedAction, Transcript};
pub use provider::LanguageModel;
