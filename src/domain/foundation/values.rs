//! Validated value objects shared across the domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A strictly positive quantity of product.
///
/// The domain sells by weight, so fractional amounts are allowed.
/// Zero and negative amounts are rejected at construction; every
/// `Quantity` held by the engine is known-positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Creates a quantity, rejecting zero or negative amounts.
    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::not_positive("quantity", amount));
        }
        Ok(Self(amount))
    }

    /// Returns the inner decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Sum of two quantities. Positive + positive stays positive, so the
    /// invariant holds without revalidation.
    pub fn plus(&self, other: Quantity) -> Quantity {
        Quantity(self.0 + other.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A syntactically valid checkout email address.
///
/// Validation is local and intentionally shallow: `local@domain` where the
/// domain has at least two non-empty dot-separated labels. Deliverability
/// is not this engine's problem; catching typos like a missing TLD before
/// a network round-trip is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and validates an email address from user input.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let mut parts = trimmed.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let Some(domain) = parts.next() else {
            return Err(ValidationError::invalid_format("email", "missing '@'"));
        };

        if local.is_empty() || local.contains(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "invalid local part"));
        }
        if domain.contains('@') || domain.contains(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "invalid domain"));
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
            return Err(ValidationError::invalid_format(
                "email",
                "domain must contain at least one dot-separated label",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
