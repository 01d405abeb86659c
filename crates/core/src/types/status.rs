//! Status enums for products and orders.
//!
//! The wire values match what the backend REST API stores, so the serde
//! renames below must not change.

use serde::{Deserialize, Serialize};

/// Catalog availability of a product.
///
/// Any status string other than `"Available"` decodes as
/// [`ProductStatus::NotAvailable`], and so does a missing status, so unknown
/// values can never make a product purchasable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    Available,
    #[default]
    #[serde(rename = "Not Available", other)]
    NotAvailable,
}

impl ProductStatus {
    /// Whether the product may be offered for adding to a cart.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Order lifecycle status.
///
/// New orders are always submitted as [`OrderStatus::Pending`]; the remaining
/// transitions happen on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Online payment.
    #[default]
    Online,
    /// Cash on delivery.
    #[serde(rename = "COD")]
    CashOnDelivery,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "Online"),
            Self::CashOnDelivery => write!(f, "COD"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "cod" => Ok(Self::CashOnDelivery),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_product_status_is_not_available() {
        let status: ProductStatus = serde_json::from_str("\"Sold Out\"").unwrap();
        assert_eq!(status, ProductStatus::NotAvailable);
        assert!(!status.is_available());

        let status: ProductStatus = serde_json::from_str("\"Available\"").unwrap();
        assert!(status.is_available());
    }

    #[test]
    fn test_payment_method_wire_values() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"COD\""
        );
        assert_eq!("cod".parse::<PaymentMethod>().unwrap(), PaymentMethod::CashOnDelivery);
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_order_status_serializes_as_pending() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::default()).unwrap(),
            "\"Pending\""
        );
    }
}
