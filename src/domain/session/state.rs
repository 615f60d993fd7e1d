//! Conversation state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Which screen of the conversation the user is on.
///
/// "Show menu" acts as a reset: `BrowsingMenu` is reachable from every
/// state, including itself. States that re-render after a mutation
/// (`ViewingProduct` on quantity selection, `ViewingCart` on line removal)
/// allow self-transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// No interaction yet.
    Idle,
    /// Looking at the product list.
    BrowsingMenu,
    /// Looking at one product's detail.
    ViewingProduct,
    /// Looking at the cart summary.
    ViewingCart,
    /// Asked for a checkout email, waiting for text input.
    AwaitingEmail,
}

impl Default for ConversationState {
    fn default() -> Self {
        ConversationState::Idle
    }
}

impl StateMachine for ConversationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationState::*;

        // Reset transition, always legal.
        if *target == BrowsingMenu {
            return true;
        }

        matches!(
            (self, target),
            (BrowsingMenu, ViewingProduct)
                | (ViewingProduct, ViewingProduct)
                | (ViewingProduct, ViewingCart)
                | (ViewingCart, ViewingCart)
                | (ViewingCart, AwaitingEmail)
                | (AwaitingEmail, AwaitingEmail)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationState::*;
        match self {
            Idle => vec![BrowsingMenu],
            BrowsingMenu => vec![BrowsingMenu, ViewingProduct],
            ViewingProduct => vec![BrowsingMenu, ViewingProduct, ViewingCart],
            ViewingCart => vec![BrowsingMenu, ViewingCart, AwaitingEmail],
            AwaitingEmail => vec![BrowsingMenu, AwaitingEmail],
        }
    }
}
