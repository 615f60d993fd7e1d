//! Per-user conversation sessions.

mod action;
mod session;
mod state;

pub use action::{RenderInstruction, UserAction};
pub use session::Session;
pub use state::ConversationState;
