//! Session entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProductId, ShopError, StateMachine, UserId};

use super::ConversationState;

/// Per-user conversation context.
///
/// Created on first interaction and persisted through the session store, so
/// it survives process restarts. Holds the current conversation state plus
/// ephemeral scratch data (the product currently on screen). It references
/// the user id only; cart identity is always re-resolved through the cart
/// store to avoid stale-state bugs across concurrent sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    state: ConversationState,
    /// Product shown while in `ViewingProduct`; cleared on reset.
    viewing_product: Option<ProductId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Creates a fresh session in the `Idle` state.
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            state: ConversationState::Idle,
            viewing_product: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn viewing_product(&self) -> Option<&ProductId> {
        self.viewing_product.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the session to a new state after validating the transition.
    ///
    /// Either fully commits the new state or leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the transition is illegal for the
    /// current state.
    pub fn transition(&mut self, target: ConversationState) -> Result<(), ShopError> {
        let next = self.state.transition_to(target)?;
        self.state = next;
        if next == ConversationState::BrowsingMenu {
            self.viewing_product = None;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Records which product is on screen. Meaningful in `ViewingProduct`.
    pub fn set_viewing_product(&mut self, product_id: ProductId) {
        self.viewing_product = Some(product_id);
        self.updated_at = Utc::now();
    }
}
