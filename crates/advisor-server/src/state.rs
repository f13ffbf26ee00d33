//! Application State

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use advisor_core::ConversationContext;
use advisor_engine::{ChatSession, ResponseComposer, SessionId};
use tokio::sync::Mutex as AsyncMutex;

/// All live sessions, keyed by id
///
/// Each session sits behind its own async mutex so one slow model call never
/// blocks unrelated conversations. The registry lock is only held to look up
/// or insert an entry.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Arc<AsyncMutex<ChatSession>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: SessionId) -> Option<Arc<AsyncMutex<ChatSession>>> {
        self.sessions.lock().unwrap().get(&id).cloned()
    }

    /// Open a new session and return its handle
    pub fn open(
        &self,
        context: ConversationContext,
        composer: Arc<ResponseComposer>,
    ) -> (SessionId, Arc<AsyncMutex<ChatSession>>) {
        let session = ChatSession::new(context, composer);
        let id = session.id();
        let handle = Arc::new(AsyncMutex::new(session));
        self.sessions.lock().unwrap().insert(id, handle.clone());
        (id, handle)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().unwrap().is_empty()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Composer shared by every session
    pub composer: Arc<ResponseComposer>,

    /// Live sessions
    pub sessions: Arc<SessionRegistry>,

    /// Whether the model reported healthy at startup
    pub model_name: String,
}
