//! State machine trait for conversation state enums.

use super::ValidationError;

/// Trait for enums that represent a finite state machine.
///
/// Implementors declare which transitions are legal; `transition_to` then
/// validates before committing. A rejected transition leaves the caller
/// holding the prior state untouched.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the transition with validation, returning an error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}
