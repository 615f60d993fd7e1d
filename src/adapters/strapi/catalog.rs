//! Catalog client over the Strapi products API.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::catalog::{Product, ProductSummary};
use crate::domain::foundation::{ProductId, ShopError, Upstream};
use crate::ports::CatalogClient;

use super::StrapiClient;

const SERVICE: Upstream = Upstream::Catalog;

/// `CatalogClient` implementation against `GET /api/products`.
#[derive(Debug, Clone)]
pub struct StrapiCatalogClient {
    client: StrapiClient,
}

impl StrapiCatalogClient {
    pub fn new(client: StrapiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    data: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    #[serde(rename = "documentId")]
    document_id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    data: DetailEntry,
}

#[derive(Debug, Deserialize)]
struct DetailEntry {
    #[serde(rename = "documentId")]
    document_id: String,
    title: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    image: ImagePayload,
}

#[derive(Debug, Deserialize)]
struct ImagePayload {
    formats: ImageFormats,
}

#[derive(Debug, Deserialize)]
struct ImageFormats {
    small: ImageFormat,
}

#[derive(Debug, Deserialize)]
struct ImageFormat {
    url: String,
}

#[async_trait]
impl CatalogClient for StrapiCatalogClient {
    async fn list_products(&self) -> Result<Vec<ProductSummary>, ShopError> {
        let envelope: ListEnvelope = self
            .client
            .get_json(SERVICE, "product list", "all", "/api/products", &[])
            .await?;

        envelope
            .data
            .into_iter()
            .map(|entry| {
                Ok(ProductSummary {
                    id: ProductId::new(entry.document_id)
                        .map_err(|_| malformed("empty product id"))?,
                    title: entry.title,
                })
            })
            .collect()
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ShopError> {
        let path = format!("/api/products/{}", id);
        let envelope: DetailEnvelope = self
            .client
            .get_json(
                SERVICE,
                "product",
                id.as_str(),
                &path,
                &[("populate", "image")],
            )
            .await?;

        let entry = envelope.data;
        let image = self
            .client
            .get_bytes(SERVICE, &entry.image.formats.small.url)
            .await?;

        Ok(Product::new(
            ProductId::new(entry.document_id).map_err(|_| malformed("empty product id"))?,
            entry.title,
            entry.description,
            entry.price,
            image,
        ))
    }
}

fn malformed(reason: &str) -> ShopError {
    ShopError::unavailable(SERVICE, format!("malformed payload: {}", reason))
}
