//! Product record as served by the catalog API.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{Discount, Price};
use super::status::ProductStatus;

/// A catalog product.
///
/// Only the fields the cart needs are modelled; the catalog sends more
/// (description, stock counts) which are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    /// Image file name under the storefront's product image directory.
    #[serde(default)]
    pub image: String,
    pub price: Price,
    /// Percentage discount; absent means no offer.
    #[serde(default)]
    pub offer: Discount,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Whether the catalog may offer this product for adding to a cart.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.status.is_available()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_decode_catalog_record() {
        let json = r#"{
            "_id": "p1",
            "name": "Bottle Art",
            "image": "bottle.jpg",
            "price": 250,
            "offer": 20,
            "status": "Available",
            "category": "Bottle Art",
            "description": "Hand painted"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price.amount(), Decimal::new(250, 0));
        assert_eq!(product.offer.percent(), Decimal::new(20, 0));
        assert!(product.is_available());
    }

    #[test]
    fn test_missing_offer_and_status_default() {
        let json = r#"{"_id": "p2", "name": "Diya", "price": 40}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.offer, Discount::NONE);
        assert_eq!(product.status, ProductStatus::NotAvailable);
        assert!(product.image.is_empty());
    }

    #[test]
    fn test_not_available() {
        let json = r#"{"_id": "p3", "name": "Frame", "price": 10, "status": "Not Available"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(!product.is_available());
    }
}
