//! # advisor-engine
//!
//! The orchestration layer of the DeFi advisor. `ResponseComposer` turns one
//! recognized intent into one assistant message by joining the data sources
//! and the language model; `ChatSession` owns the transcript and the wallet
//! context and funnels every submission through the composer.
//!
//! ```text
//!   user text / action
//!         |
//!     ChatSession ──── transcript (append-only)
//!         |
//!   ResponseComposer
//!    /     |      \
//! market catalog network ── Fetched::Live | Fetched::Fallback
//!         |
//!   LanguageModel ── live answer | canned reply
//! ```

pub mod composer;
pub mod prompt;
pub mod session;

pub use composer::ResponseComposer;
pub use session::{ChatSession, SessionId};
