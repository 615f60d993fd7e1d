//! Inbound user actions and outbound render instructions.
//!
//! Actions are decoded once at the transport boundary into these tagged
//! variants; nothing downstream re-parses callback strings. Render
//! instructions describe what to present, leaving message choreography
//! (edit vs. send vs. delete) to the transport collaborator.

use serde::{Deserialize, Serialize};

use crate::domain::cart::CartSummary;
use crate::domain::catalog::{Product, ProductSummary};
use crate::domain::foundation::{LineId, ProductId, Quantity};

/// One inbound user action, decoded by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserAction {
    /// "/start" or the Back button: show the product menu.
    ShowMenu,
    /// A product was picked from the menu.
    SelectProduct { product_id: ProductId },
    /// A quantity was chosen for a product; triggers an add-to-cart merge.
    SetQuantity {
        product_id: ProductId,
        quantity: Quantity,
    },
    /// Show the cart summary.
    ViewCart,
    /// Remove one line from the cart.
    RemoveLine { line_id: LineId },
    /// Begin checkout: ask for an email.
    Checkout,
    /// Text entered while the engine awaits an email.
    SubmitEmail { input: String },
    /// Any other free-form text.
    FreeText { input: String },
}

/// What the transport layer should present to the user next.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    /// The product menu.
    ShowProductList { products: Vec<ProductSummary> },
    /// One product's detail, image bytes included.
    ShowProductDetail { product: Product },
    /// The cart: lines plus exact total.
    ShowCartSummary { summary: CartSummary },
    /// Ask the user to type a checkout email.
    PromptForEmail,
    /// Something went wrong. When `retry` is set, the transport should offer
    /// to resubmit exactly that action.
    ShowError {
        message: String,
        retry: Option<UserAction>,
    },
}
