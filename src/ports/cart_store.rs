//! Cart store port.
//!
//! The cart store is a remote service holding carts and cart lines keyed by
//! user identity. None of these calls are atomic across each other; the
//! reconciliation engine tolerates read-then-write races (see
//! `ReconciliationEngine::add_item`).

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::cart::Cart;
use crate::domain::foundation::{CartId, EmailAddress, LineId, ProductId, Quantity, ShopError, UserId};

/// Data for a line that does not exist in the store yet. Price and title
/// are the snapshots captured at add time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub unit_price: Decimal,
    pub title: String,
}

/// Remote persistence for carts and their lines.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Finds the cart owned by a user, or `None` if the user has none yet.
    ///
    /// # Errors
    ///
    /// - `InvariantViolation` if the store returns duplicate lines for one product
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn find_cart_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, ShopError>;

    /// Creates an empty cart for a user.
    ///
    /// The store enforces uniqueness on user id; callers go through
    /// `find_cart_by_user` first.
    ///
    /// # Errors
    ///
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn create_cart(&self, user_id: &UserId) -> Result<Cart, ShopError>;

    /// Inserts a new line into a cart, returning the store-assigned line id.
    ///
    /// # Errors
    ///
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn insert_line(&self, cart_id: &CartId, line: &NewCartLine) -> Result<LineId, ShopError>;

    /// Replaces the quantity of an existing line (used for merge updates).
    ///
    /// # Errors
    ///
    /// - `NotFound` if the line no longer exists
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn update_line_quantity(
        &self,
        line_id: &LineId,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), ShopError>;

    /// Deletes a line unconditionally.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the line does not exist (soft condition, safe to retry)
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn delete_line(&self, line_id: &LineId) -> Result<(), ShopError>;

    /// Persists the checkout email on a cart.
    ///
    /// # Errors
    ///
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn set_email(&self, cart_id: &CartId, email: &EmailAddress) -> Result<(), ShopError>;
}
