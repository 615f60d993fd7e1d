//! Cart aggregate and line entities.
//!
//! # Invariants
//!
//! - A cart holds at most one line per distinct product id; quantities for
//!   the same product are merged, never duplicated.
//! - Line price and title are snapshots captured when the line was created,
//!   so totals are stable against later catalog price changes.
//! - All monetary arithmetic is exact decimal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{CartId, EmailAddress, LineId, ProductId, Quantity, ShopError, UserId};

/// One product-and-quantity entry within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    id: LineId,
    product_id: ProductId,
    quantity: Quantity,
    unit_price: Decimal,
    title: String,
}

impl CartLine {
    pub fn new(
        id: LineId,
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Decimal,
        title: String,
    ) -> Self {
        Self {
            id,
            product_id,
            quantity,
            unit_price,
            title,
        }
    }

    pub fn id(&self) -> &LineId {
        &self.id
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price captured when the line was created.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Display name captured when the line was created.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Line subtotal: quantity times snapshot unit price.
    pub fn total(&self) -> Decimal {
        self.quantity.amount() * self.unit_price
    }
}

/// A user's in-progress collection of selected products awaiting checkout.
///
/// Owned 1:1 by a user id and created lazily on first use. The cart
/// exclusively owns its lines; a removed line is gone, not shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    user_id: UserId,
    lines: Vec<CartLine>,
    email: Option<EmailAddress>,
}

impl Cart {
    /// Creates an empty cart for a user.
    pub fn empty(id: CartId, user_id: UserId) -> Self {
        Self {
            id,
            user_id,
            lines: Vec::new(),
            email: None,
        }
    }

    /// Reconstitutes a cart from store data, enforcing the one-line-per-product
    /// invariant.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the store handed back two lines for the
    /// same product. That indicates store-side corruption; it is surfaced, not
    /// merged away.
    pub fn from_lines(
        id: CartId,
        user_id: UserId,
        lines: Vec<CartLine>,
        email: Option<EmailAddress>,
    ) -> Result<Self, ShopError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for line in &lines {
            if !seen.insert(line.product_id().as_str()) {
                return Err(ShopError::InvariantViolation(format!(
                    "cart {} has duplicate lines for product {}",
                    id,
                    line.product_id()
                )));
            }
        }
        Ok(Self {
            id,
            user_id,
            lines,
            email,
        })
    }

    pub fn id(&self) -> &CartId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Finds the line holding the given product, if any.
    pub fn line_for_product(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Finds a line by its id.
    pub fn line(&self, line_id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == line_id)
    }

    /// Cart total: exact decimal sum of line subtotals.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Appends a new line. The caller (the reconciliation engine) is
    /// responsible for having checked that no line for this product exists.
    pub(crate) fn push_line(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Replaces the quantity of an existing line.
    pub(crate) fn set_line_quantity(&mut self, line_id: &LineId, quantity: Quantity) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id() == line_id) {
            line.quantity = quantity;
        }
    }

    /// Removes a line, returning it if it was present.
    pub(crate) fn take_line(&mut self, line_id: &LineId) -> Option<CartLine> {
        let pos = self.lines.iter().position(|l| l.id() == line_id)?;
        Some(self.lines.remove(pos))
    }

    /// Records the checkout email locally after the store accepted it.
    pub(crate) fn set_email(&mut self, email: EmailAddress) {
        self.email = Some(email);
    }

    /// Produces the summary handed to the transport layer for rendering.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            cart_id: self.id.clone(),
            lines: self.lines.clone(),
            total: self.total(),
        }
    }
}

/// Snapshot of a cart for display: lines plus the computed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub cart_id: CartId,
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}
