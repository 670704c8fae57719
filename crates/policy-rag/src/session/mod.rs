//! Per-user conversation history
//!
//! Sessions are created lazily on first contact and live until the process
//! exits. Each session sits behind its own async mutex so one user's requests
//! are serialized while different users never contend.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::types::{Role, Turn};

/// Shared handle to one user's session
pub type SessionHandle = Arc<Mutex<Session>>;

/// Ordered, append-only turn history for one user
#[derive(Debug, Clone, Default)]
pub struct Session {
    turns: Vec<Turn>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Append a user question and the assistant answer as one exchange
    pub fn push_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(Turn::user(question));
        self.turns.push(Turn::assistant(answer));
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The last `n` turns, oldest first
    pub fn recent(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turn was recorded yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Process-wide map from user identifier to session
///
/// The identifier is taken as given; no validation or normalization.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for `user_id`, created empty on first access
    pub fn get_or_create(&self, user_id: &str) -> SessionHandle {
        if let Some(existing) = self.sessions.get(user_id) {
            return Arc::clone(existing.value());
        }

        let entry = self
            .sessions
            .entry(user_id.to_string())
            .or_insert_with(|| {
                tracing::debug!("Created session for {}", user_id);
                Arc::new(Mutex::new(Session::new()))
            });
        Arc::clone(entry.value())
    }

    /// Append one turn to `user_id`'s session
    pub async fn append(&self, user_id: &str, role: Role, content: impl Into<String>) {
        let handle = self.get_or_create(user_id);
        handle.lock().await.push(Turn::new(role, content));
    }

    /// Copy of `user_id`'s history, empty when the user is unknown
    pub async fn history(&self, user_id: &str) -> Vec<Turn> {
        let handle = match self.sessions.get(user_id) {
            Some(entry) => Arc::clone(entry.value()),
            None => return Vec::new(),
        };
        let session = handle.lock().await;
        session.turns().to_vec()
    }

    /// True when a session exists for `user_id`
    pub fn contains(&self, user_id: &str) -> bool {
        self.sessions.contains_key(user_id)
    }

    /// Number of known users
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no user has been seen
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
