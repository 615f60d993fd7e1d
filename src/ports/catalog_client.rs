//! Catalog client port.
//!
//! The catalog is consumed, never mutated. Implementations talk to the
//! remote catalog service with bounded timeouts; a timed-out call surfaces
//! as `UpstreamUnavailable`.

use async_trait::async_trait;

use crate::domain::catalog::{Product, ProductSummary};
use crate::domain::foundation::{ProductId, ShopError};

/// Read access to the remote product catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Lists all products for the menu.
    ///
    /// # Errors
    ///
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn list_products(&self) -> Result<Vec<ProductSummary>, ShopError>;

    /// Fetches one product's detail, including image bytes.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the product does not exist
    /// - `UpstreamUnavailable` on transport failure or timeout
    async fn get_product(&self, id: &ProductId) -> Result<Product, ShopError>;
}
