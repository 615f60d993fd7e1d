//! Cart reconciliation engine.
//!
//! Enforces merge-or-create semantics on cart mutations: one line per
//! product, quantities incremented on duplicate adds, price and title
//! snapshotted when a line is first created.

use std::sync::Arc;

use tracing::debug;

use crate::domain::cart::{Cart, CartLine};
use crate::domain::catalog::Product;
use crate::domain::foundation::{EmailAddress, LineId, Quantity, ShopError, UserId};
use crate::ports::{CartStore, NewCartLine};

/// Applies cart mutations through the cart store while keeping the local
/// cart copy in sync.
#[derive(Clone)]
pub struct ReconciliationEngine {
    cart_store: Arc<dyn CartStore>,
}

impl ReconciliationEngine {
    pub fn new(cart_store: Arc<dyn CartStore>) -> Self {
        Self { cart_store }
    }

    /// Looks up the user's cart, creating an empty one on first use.
    ///
    /// Safe to call repeatedly: the store's uniqueness on user id guards
    /// against duplicate carts.
    ///
    /// # Errors
    ///
    /// - `UpstreamUnavailable` on cart store transport failure
    /// - `InvariantViolation` if the store returns a corrupt cart
    pub async fn get_or_create_cart(&self, user_id: &UserId) -> Result<Cart, ShopError> {
        if let Some(cart) = self.cart_store.find_cart_by_user(user_id).await? {
            return Ok(cart);
        }
        debug!(user_id = %user_id, "no cart for user, creating one");
        self.cart_store.create_cart(user_id).await
    }

    /// Adds a quantity of a product to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented,
    /// not replaced; otherwise a new line is created with the product's
    /// current price and title as snapshots. The local cart is updated only
    /// after the store accepted the write.
    ///
    /// Two rapid submissions for the same product may race as two
    /// sequential increments rather than one. The increments commute, so
    /// this is accepted eventual consistency, not guarded by a lock.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the merged line vanished between read and write
    /// - `UpstreamUnavailable` on cart store transport failure
    pub async fn add_item(
        &self,
        cart: &mut Cart,
        product: &Product,
        quantity: Quantity,
    ) -> Result<(), ShopError> {
        if let Some(line) = cart.line_for_product(product.id()) {
            let line_id = line.id().clone();
            let merged = line.quantity().plus(quantity);
            debug!(
                cart_id = %cart.id(),
                line_id = %line_id,
                merged = %merged,
                "merging quantity into existing line"
            );
            self.cart_store
                .update_line_quantity(&line_id, cart.id(), product.id(), merged)
                .await?;
            cart.set_line_quantity(&line_id, merged);
        } else {
            let new_line = NewCartLine {
                product_id: product.id().clone(),
                quantity,
                unit_price: product.price(),
                title: product.title().to_string(),
            };
            let line_id = self.cart_store.insert_line(cart.id(), &new_line).await?;
            debug!(cart_id = %cart.id(), line_id = %line_id, "created new cart line");
            cart.push_line(CartLine::new(
                line_id,
                new_line.product_id,
                new_line.quantity,
                new_line.unit_price,
                new_line.title,
            ));
        }
        Ok(())
    }

    /// Removes a line from the cart.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the line no longer exists (soft condition, safe to retry)
    /// - `UpstreamUnavailable` on cart store transport failure
    pub async fn remove_item(&self, cart: &mut Cart, line_id: &LineId) -> Result<(), ShopError> {
        self.cart_store.delete_line(line_id).await?;
        cart.take_line(line_id);
        Ok(())
    }

    /// Validates and persists the checkout email.
    ///
    /// Validation happens locally first; malformed input is rejected without
    /// a network round-trip.
    ///
    /// # Errors
    ///
    /// - `Validation` for a malformed address
    /// - `UpstreamUnavailable` on cart store transport failure
    pub async fn set_checkout_email(
        &self,
        cart: &mut Cart,
        input: &str,
    ) -> Result<EmailAddress, ShopError> {
        let email = EmailAddress::parse(input)?;
        self.cart_store.set_email(cart.id(), &email).await?;
        cart.set_email(email.clone());
        Ok(email)
    }
}
