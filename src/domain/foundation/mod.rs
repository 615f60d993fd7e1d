//! Shared domain building blocks: errors, identifiers, value objects,
//! and the state machine trait.

mod errors;
mod ids;
mod state_machine;
mod values;

pub use errors::{ShopError, Upstream, ValidationError};
pub use ids::{CartId, LineId, ProductId, UserId};
pub use state_machine::StateMachine;
pub use values::{EmailAddress, Quantity};
