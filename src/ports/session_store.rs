//! Session store port.
//!
//! Sessions are keyed by user id and must outlive the process; the
//! production adapter is redis-backed. Expiry is delegated to the storage
//! TTL, so there is no explicit delete here.

use async_trait::async_trait;

use crate::domain::foundation::{ShopError, UserId};
use crate::domain::session::Session;

/// Keyed persistence for per-user conversation sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a user's session, or `None` if the user has never interacted.
    ///
    /// # Errors
    ///
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn load(&self, user_id: &UserId) -> Result<Option<Session>, ShopError>;

    /// Saves a session, overwriting any previous value for the user.
    ///
    /// # Errors
    ///
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn save(&self, session: &Session) -> Result<(), ShopError>;
}
