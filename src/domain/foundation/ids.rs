//! Strongly-typed identifier value objects.
//!
//! All identifiers are opaque strings issued elsewhere: user ids come from
//! the chat transport, product/cart/line ids are the CMS document ids.
//! They are never parsed or generated here, only carried.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $field:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, rejecting empty input.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(value))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Identity of a chat user. One cart and one session per user.
    UserId,
    "user_id"
);

string_id!(
    /// Identifier of a catalog product.
    ProductId,
    "product_id"
);

string_id!(
    /// Identifier of a cart.
    CartId,
    "cart_id"
);

string_id!(
    /// Identifier of a single cart line.
    LineId,
    "line_id"
);
