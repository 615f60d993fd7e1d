//! Redis-backed session store for production deployments.
//!
//! Sessions are stored as JSON under `fishmonger:session:{user_id}` so they
//! survive process restarts and are shared across instances. Expiry is left
//! to a key TTL configured on the redis side.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{ShopError, Upstream, UserId};
use crate::domain::session::Session;
use crate::ports::SessionStore;

const KEY_PREFIX: &str = "fishmonger:session:";

/// Redis-backed `SessionStore`.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    fn key(user_id: &UserId) -> String {
        format!("{}{}", KEY_PREFIX, user_id)
    }

    fn unavailable(err: impl std::fmt::Display) -> ShopError {
        ShopError::unavailable(Upstream::SessionStore, err.to_string())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<Session>, ShopError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(Self::key(user_id))
            .await
            .map_err(Self::unavailable)?;

        match raw {
            Some(json) => {
                let session = serde_json::from_str(&json).map_err(|err| {
                    ShopError::InvariantViolation(format!(
                        "stored session for {} is corrupt: {}",
                        user_id, err
                    ))
                })?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), ShopError> {
        let json = serde_json::to_string(session).map_err(Self::unavailable)?;
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(Self::key(session.user_id()), json)
            .await
            .map_err(Self::unavailable)
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore").finish_non_exhaustive()
    }
}
