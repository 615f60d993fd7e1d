//! Catalog read models.
//!
//! Products are owned by the remote catalog service and are read-only from
//! this engine's perspective. The engine snapshots price and title into cart
//! lines at add time, so later catalog edits never rewrite cart history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProductId;

/// One entry in the product list shown on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
}

/// Full product detail, including the image payload fetched from the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    description: String,
    price: Decimal,
    image: Vec<u8>,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: String,
        description: String,
        price: Decimal,
        image: Vec<u8>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            price,
            image,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit price at the time the product was fetched.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Raw image bytes for the transport layer to display.
    pub fn image(&self) -> &[u8] {
        &self.image
    }
}
