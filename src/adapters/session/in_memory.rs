//! In-memory session store.
//!
//! Sessions kept in a process-local map. Useful for tests and local runs;
//! production uses the redis adapter so sessions survive restarts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ShopError, UserId};
use crate::domain::session::Session;
use crate::ports::SessionStore;

/// Process-local `SessionStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions (useful for tests).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<Session>, ShopError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(user_id.as_str()).cloned())
    }

    async fn save(&self, session: &Session) -> Result<(), ShopError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.user_id().as_str().to_string(), session.clone());
        Ok(())
    }
}
