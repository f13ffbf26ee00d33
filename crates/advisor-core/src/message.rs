//! Conversation Messages
//!
//! Message and transcript types for the advisor conversation. Messages are
//! immutable once created; the transcript is an append-only ordered log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::Intent;

/// Who authored a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// User input (typed or a suggested-action click)
    User,
    /// Assistant reply produced by the composer
    Assistant,
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Author::User => write!(f, "user"),
            Author::Assistant => write!(f, "assistant"),
        }
    }
}

/// A data source consulted while composing a reply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitedSource {
    /// Display name (e.g. "Chainlink AVAX/USD Feed")
    pub name: String,

    /// Coarse kind label (e.g. "Price Feed", "Language Model", "System")
    pub kind: String,

    /// Whether the data came from the live source rather than a fallback
    pub verified: bool,
}

impl CitedSource {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, verified: bool) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            verified,
        }
    }
}

/// A follow-up action offered underneath an assistant reply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAction {
    /// Button label
    pub label: String,

    /// Intent dispatched when clicked; always from the closed intent set
    pub intent: Intent,
}

impl SuggestedAction {
    pub fn for_intent(intent: Intent) -> Self {
        Self {
            label: intent.label().into(),
            intent,
        }
    }
}

/// A single message in the conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: Uuid,

    /// Message author
    pub author: Author,

    /// Plain-text body
    pub body: String,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Sources consulted while composing this message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<CitedSource>,

    /// Suggested follow-up actions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<SuggestedAction>,
}

impl Message {
    /// Create a new message
    pub fn new(author: Author, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            body: body.into(),
            created_at: Utc::now(),
            sources: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a user message
    pub fn user(body: impl Into<String>) -> Self {
        Self::new(Author::User, body)
    }

    /// Create an assistant message
    pub fn assistant(body: impl Into<String>) -> Self {
        Self::new(Author::Assistant, body)
    }

    /// Attach cited sources
    pub fn with_sources(mut self, sources: Vec<CitedSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Attach suggested follow-up actions
    pub fn with_suggestions(mut self, intents: &[Intent]) -> Self {
        self.suggestions = intents.iter().copied().map(SuggestedAction::for_intent).collect();
        self
    }
}

fn default_max_messages() -> usize {
    200
}

/// Append-only ordered conversation history
///
/// Insertion order is display order. Messages are never reordered or mutated
/// after append. Growth is bounded by `max_messages`: once the cap is reached
/// the oldest message is dropped per append, keeping the most recent turns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,

    /// Retention cap on stored messages
    #[serde(default = "default_max_messages")]
    max_messages: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: default_max_messages(),
        }
    }

    /// Create with a custom retention cap (must be at least 2 to hold a turn)
    pub fn with_capacity(max_messages: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_messages: max_messages.max(2),
        }
    }

    /// Append a message, evicting the oldest if the cap is reached
    pub fn push(&mut self, message: Message) {
        if self.messages.len() >= self.max_messages {
            self.messages.remove(0);
        }
        self.messages.push(message);
    }

    /// All messages in display order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.author, Author::User);
        assert_eq!(msg.body, "Hello");
        assert!(msg.sources.is_empty());
    }

    #[test]
    fn test_with_suggestions_uses_labels() {
        let msg = Message::assistant("ok").with_suggestions(&[Intent::Analyze]);
        assert_eq!(msg.suggestions.len(), 1);
        assert_eq!(msg.suggestions[0].label, "Analyze my wallet with AI");
        assert_eq!(msg.suggestions[0].intent, Intent::Analyze);
    }

    #[test]
    fn test_transcript_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("A"));
        transcript.push(Message::assistant("reply A"));
        transcript.push(Message::user("B"));

        let bodies: Vec<&str> = transcript.messages().iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["A", "reply A", "B"]);
    }

    #[test]
    fn test_transcript_retention_drops_oldest() {
        let mut transcript = Transcript::with_capacity(3);
        for i in 0..5 {
            transcript.push(Message::user(format!("m{}", i)));
        }

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[0].body, "m2");
        assert_eq!(transcript.last().unwrap().body, "m4");
    }
}
