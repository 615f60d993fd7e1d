//! Error types for the domain layer.
//!
//! The taxonomy matters to the dispatcher: validation failures are reported
//! to the user with no retry needed, not-found conditions trigger a
//! re-render to resynchronize, and upstream failures carry an explicit
//! retry affordance while the session state stays put.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    #[error("Field '{field}' must be positive, got {actual}")]
    NotPositive { field: &'static str, actual: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: &'static str) -> Self {
        ValidationError::EmptyField { field }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }

    /// Creates a not-positive validation error.
    pub fn not_positive(field: &'static str, actual: impl fmt::Display) -> Self {
        ValidationError::NotPositive {
            field,
            actual: actual.to_string(),
        }
    }
}

/// The external services this engine depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Catalog,
    CartStore,
    SessionStore,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Upstream::Catalog => "catalog",
            Upstream::CartStore => "cart store",
            Upstream::SessionStore => "session store",
        };
        write!(f, "{}", s)
    }
}

/// Domain error taxonomy for the storefront engine.
///
/// Every operation that touches an external service can fail with
/// [`ShopError::UpstreamUnavailable`]; callers must not conflate that with
/// [`ShopError::NotFound`] or [`ShopError::Validation`], since only the
/// upstream case warrants a retry of the same action.
#[derive(Debug, Clone, Error)]
pub enum ShopError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{service} unavailable: {reason}")]
    UpstreamUnavailable { service: Upstream, reason: String },

    /// Store-side corruption outside this engine's control, e.g. two cart
    /// lines for the same product. Logged and surfaced, never silently
    /// repaired.
    #[error("store invariant violated: {0}")]
    InvariantViolation(String),
}

impl ShopError {
    /// Creates a not-found error for an entity.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ShopError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates an upstream-unavailable error for a service.
    pub fn unavailable(service: Upstream, reason: impl Into<String>) -> Self {
        ShopError::UpstreamUnavailable {
            service,
            reason: reason.into(),
        }
    }

    /// Whether retrying the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ShopError::UpstreamUnavailable { .. })
    }
}
