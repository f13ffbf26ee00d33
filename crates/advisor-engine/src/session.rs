//! Conversation Session
//!
//! Owns the append-only transcript and the wallet context for one
//! conversation, and routes each submission through the composer. The
//! transcript always opens with the greeting and strictly alternates
//! user input then assistant reply; nothing is ever reordered.

use std::sync::Arc;

use advisor_core::{ConversationContext, Intent, Message, Result, Transcript};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::composer::ResponseComposer;

/// Opaque session identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Clears the busy flag when dropped, including during unwind, so a panic
/// inside composition never leaves the session wedged
struct BusyGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

/// One conversation: transcript, wallet context, and in-flight guard
pub struct ChatSession {
    id: SessionId,
    transcript: Transcript,
    context: ConversationContext,
    composer: Arc<ResponseComposer>,
    busy: bool,
}

impl ChatSession {
    /// Open a session seeded with the greeting message
    pub fn new(context: ConversationContext, composer: Arc<ResponseComposer>) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(ResponseComposer::welcome());
        Self {
            id: SessionId::generate(),
            transcript,
            context,
            composer,
            busy: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Replace the wallet context; the browser resends it on every request
    pub fn set_context(&mut self, context: ConversationContext) {
        self.context = context;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether a new submission would be accepted right now
    pub fn can_submit(&self) -> bool {
        !self.busy && self.context.wallet_connected
    }

    /// Submit free-form user text. Blank input is ignored and returns
    /// `Ok(false)`; otherwise the user turn and the assistant reply are
    /// appended in order and `Ok(true)` is returned.
    pub async fn submit_input(&mut self, text: &str) -> Result<bool> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        self.transcript.push(Message::user(trimmed));
        let reply = {
            let _busy = BusyGuard::engage(&mut self.busy);
            match self
                .composer
                .compose_free_form(trimmed, &self.context)
                .await
            {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::error!(session = %self.id, error = %e, "composition failed");
                    ResponseComposer::apology()
                }
            }
        };
        self.transcript.push(reply);
        Ok(true)
    }

    /// Submit a suggested action. The action label is recorded as the user
    /// turn so the transcript reads the same as typed input.
    pub async fn submit_action(&mut self, intent: Intent) -> Result<()> {
        self.transcript.push(Message::user(intent.label()));
        let reply = {
            let _busy = BusyGuard::engage(&mut self.busy);
            match self.composer.compose(intent, &self.context).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::error!(session = %self.id, intent = %intent, error = %e, "composition failed");
                    ResponseComposer::apology()
                }
            }
        };
        self.transcript.push(reply);
        Ok(())
    }
}
