//! Screen-level state for the catalog, cart and checkout pages.
//!
//! Each screen reads the persisted store when mounted and again after each
//! mutation it performs. Nothing is cached between screens; a screen that was
//! mounted before another handle wrote the store shows stale data until its
//! next refresh.

mod cart;
mod catalog;
mod checkout;

pub use cart::CartScreen;
pub use catalog::{ALL_CATEGORIES, CATEGORIES, CatalogScreen};
pub use checkout::{CheckoutOutcome, CheckoutScreen};

use craft_culture_core::{CURRENCY_SYMBOL, LineItem};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::calculator::{CartSummary, line_total};

/// Format an amount as rupees with two decimals, e.g. `₹115.00`.
///
/// Rounds half away from zero.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{CURRENCY_SYMBOL}{rounded}")
}

// =============================================================================
// Views
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    /// Badge such as "10% OFF"; `None` without a discount.
    pub offer: Option<String>,
    pub line_price: String,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.product_id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: format_price(item.unit_price.amount()),
            offer: item
                .discount
                .is_discounted()
                .then(|| item.discount.to_string()),
            line_price: format_price(line_total(item)),
        }
    }
}

/// Cart display data, shared by the cart and checkout screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Build the view for `items`.
    #[must_use]
    pub fn of(items: &[LineItem]) -> Self {
        let summary = CartSummary::of(items);
        Self {
            items: items.iter().map(CartItemView::from).collect(),
            subtotal: format_price(summary.subtotal),
            shipping: if summary.free_shipping() {
                "Free".to_string()
            } else {
                format_price(summary.shipping)
            },
            total: format_price(summary.total),
            item_count: summary.item_count,
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
