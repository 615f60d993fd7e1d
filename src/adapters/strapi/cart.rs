//! Cart store over the Strapi carts and cart-items APIs.
//!
//! Carts are unique per user id (`filters[userid][$eq]`); lines live in a
//! separate cart-items collection referencing cart and product. Quantities
//! travel as strings to keep their decimal precision, and each line stores
//! the price/title snapshot captured when it was created.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::cart::{Cart, CartLine};
use crate::domain::foundation::{
    CartId, EmailAddress, LineId, ProductId, Quantity, ShopError, Upstream, UserId,
};
use crate::ports::{CartStore, NewCartLine};

use super::StrapiClient;

const SERVICE: Upstream = Upstream::CartStore;

/// `CartStore` implementation against `/api/carts` and `/api/cart-items`.
#[derive(Debug, Clone)]
pub struct StrapiCartStore {
    client: StrapiClient,
}

impl StrapiCartStore {
    pub fn new(client: StrapiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CartListEnvelope {
    #[serde(default)]
    data: Vec<CartEntry>,
}

#[derive(Debug, Deserialize)]
struct CartCreateEnvelope {
    data: Option<CartCreated>,
}

#[derive(Debug, Deserialize)]
struct CartCreated {
    #[serde(rename = "documentId")]
    document_id: String,
}

#[derive(Debug, Deserialize)]
struct CartEntry {
    #[serde(rename = "documentId")]
    document_id: String,
    #[serde(default)]
    cart_items: Vec<CartItemEntry>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CartItemEntry {
    #[serde(rename = "documentId")]
    document_id: String,
    amount: Decimal,
    /// Price snapshot taken when the line was created. Older rows predate
    /// the snapshot fields and fall back to the product relation.
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default)]
    title: Option<String>,
    product: ProductRef,
}

#[derive(Debug, Deserialize)]
struct ProductRef {
    #[serde(rename = "documentId")]
    document_id: String,
    title: String,
    price: Decimal,
}

#[derive(Debug, Deserialize)]
struct LineCreateEnvelope {
    data: LineCreated,
}

#[derive(Debug, Deserialize)]
struct LineCreated {
    #[serde(rename = "documentId")]
    document_id: String,
}

fn corrupt(reason: impl Into<String>) -> ShopError {
    ShopError::InvariantViolation(reason.into())
}

impl CartItemEntry {
    fn into_line(self) -> Result<CartLine, ShopError> {
        let quantity = Quantity::new(self.amount)
            .map_err(|_| corrupt(format!("cart item {} has non-positive amount", self.document_id)))?;
        let unit_price = self.price.unwrap_or(self.product.price);
        let title = self.title.unwrap_or(self.product.title);
        Ok(CartLine::new(
            LineId::new(self.document_id).map_err(|_| corrupt("cart item missing id"))?,
            ProductId::new(self.product.document_id)
                .map_err(|_| corrupt("cart item missing product id"))?,
            quantity,
            unit_price,
            title,
        ))
    }
}

#[async_trait]
impl CartStore for StrapiCartStore {
    async fn find_cart_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, ShopError> {
        let envelope: CartListEnvelope = self
            .client
            .get_json(
                SERVICE,
                "cart",
                user_id.as_str(),
                "/api/carts/",
                &[
                    ("filters[userid][$eq]", user_id.as_str()),
                    ("populate", "cart_items.product"),
                ],
            )
            .await?;

        let Some(entry) = envelope.data.into_iter().next() else {
            return Ok(None);
        };

        let lines = entry
            .cart_items
            .into_iter()
            .map(CartItemEntry::into_line)
            .collect::<Result<Vec<_>, _>>()?;

        // A syntactically broken stored email is treated as unset rather
        // than poisoning every cart read.
        let email = entry.email.as_deref().and_then(|e| EmailAddress::parse(e).ok());

        let cart_id =
            CartId::new(entry.document_id).map_err(|_| corrupt("cart missing document id"))?;
        Cart::from_lines(cart_id, user_id.clone(), lines, email).map(Some)
    }

    async fn create_cart(&self, user_id: &UserId) -> Result<Cart, ShopError> {
        debug!(user_id = %user_id, "creating cart");
        let body = json!({ "data": { "userid": user_id.as_str() } });
        let envelope: CartCreateEnvelope = self
            .client
            .post_json(SERVICE, "cart", user_id.as_str(), "/api/carts/", &body)
            .await?;

        let created = envelope
            .data
            .ok_or_else(|| ShopError::unavailable(SERVICE, "cart creation returned no data"))?;
        let cart_id =
            CartId::new(created.document_id).map_err(|_| corrupt("cart missing document id"))?;
        Ok(Cart::empty(cart_id, user_id.clone()))
    }

    async fn insert_line(&self, cart_id: &CartId, line: &NewCartLine) -> Result<LineId, ShopError> {
        let body = json!({
            "data": {
                "product": line.product_id.as_str(),
                "amount": line.quantity.to_string(),
                "price": line.unit_price.to_string(),
                "title": line.title,
                "cart": cart_id.as_str(),
            }
        });
        let envelope: LineCreateEnvelope = self
            .client
            .post_json(
                SERVICE,
                "cart line",
                line.product_id.as_str(),
                "/api/cart-items",
                &body,
            )
            .await?;

        LineId::new(envelope.data.document_id).map_err(|_| corrupt("cart item missing id"))
    }

    async fn update_line_quantity(
        &self,
        line_id: &LineId,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), ShopError> {
        let body = json!({
            "data": {
                "product": product_id.as_str(),
                "amount": quantity.to_string(),
                "cart": cart_id.as_str(),
            }
        });
        let path = format!("/api/cart-items/{}", line_id);
        self.client
            .put_json(SERVICE, "cart line", line_id.as_str(), &path, &body)
            .await
    }

    async fn delete_line(&self, line_id: &LineId) -> Result<(), ShopError> {
        let path = format!("/api/cart-items/{}", line_id);
        self.client
            .delete(SERVICE, "cart line", line_id.as_str(), &path)
            .await
    }

    async fn set_email(&self, cart_id: &CartId, email: &EmailAddress) -> Result<(), ShopError> {
        let body = json!({ "data": { "email": email.as_str() } });
        let path = format!("/api/carts/{}", cart_id);
        self.client
            .put_json(SERVICE, "cart", cart_id.as_str(), &path, &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cart_payload_deserializes_with_lines() {
        let json = r#"{
            "data": [{
                "documentId": "cart-1",
                "email": "user@example.com",
                "cart_items": [{
                    "documentId": "line-1",
                    "amount": "2.5",
                    "price": "4.20",
                    "title": "Mackerel",
                    "product": {"documentId": "fish-1", "title": "Mackerel", "price": 5.0}
                }]
            }]
        }"#;
        let envelope: CartListEnvelope = serde_json::from_str(json).unwrap();
        let entry = &envelope.data[0];
        assert_eq!(entry.document_id, "cart-1");
        assert_eq!(entry.cart_items.len(), 1);
        assert_eq!(entry.cart_items[0].amount, dec!(2.5));
    }

    #[test]
    fn line_uses_snapshot_price_over_product_price() {
        let json = r#"{
            "documentId": "line-1",
            "amount": "2",
            "price": "4.20",
            "title": "Old Mackerel",
            "product": {"documentId": "fish-1", "title": "Mackerel", "price": "9.99"}
        }"#;
        let entry: CartItemEntry = serde_json::from_str(json).unwrap();
        let line = entry.into_line().unwrap();
        assert_eq!(line.unit_price(), dec!(4.20));
        assert_eq!(line.title(), "Old Mackerel");
    }

    #[test]
    fn line_falls_back_to_product_fields_without_snapshot() {
        let json = r#"{
            "documentId": "line-1",
            "amount": "2",
            "product": {"documentId": "fish-1", "title": "Mackerel", "price": "9.99"}
        }"#;
        let entry: CartItemEntry = serde_json::from_str(json).unwrap();
        let line = entry.into_line().unwrap();
        assert_eq!(line.unit_price(), dec!(9.99));
        assert_eq!(line.title(), "Mackerel");
    }

    #[test]
    fn non_positive_stored_amount_is_an_invariant_violation() {
        let json = r#"{
            "documentId": "line-1",
            "amount": "0",
            "product": {"documentId": "fish-1", "title": "Mackerel", "price": "9.99"}
        }"#;
        let entry: CartItemEntry = serde_json::from_str(json).unwrap();
        assert!(matches!(
            entry.into_line(),
            Err(ShopError::InvariantViolation(_))
        ));
    }

    #[test]
    fn empty_cart_list_means_no_cart() {
        let envelope: CartListEnvelope = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(envelope.data.is_empty());
    }
}
