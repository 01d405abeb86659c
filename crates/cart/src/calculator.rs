//! Cart arithmetic.
//!
//! Pure functions over line items. Results are exact decimals; rounding for
//! display belongs to the screens (see [`crate::screens::format_price`]).
//! There is no tax, and shipping is always free.

use craft_culture_core::LineItem;
use rust_decimal::Decimal;
use serde::Serialize;

/// Price of one line after its discount: `unit_price * quantity * (1 - offer / 100)`.
#[must_use]
pub fn line_total(item: &LineItem) -> Decimal {
    item.unit_price.amount() * Decimal::from(item.quantity) * item.discount.remaining_fraction()
}

/// Sum of [`line_total`] over `items`. Zero for an empty cart.
#[must_use]
pub fn cart_total(items: &[LineItem]) -> Decimal {
    items.iter().map(line_total).sum()
}

/// Order summary shown next to the cart and on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub subtotal: Decimal,
    /// Always zero; displayed as "Free".
    pub shipping: Decimal,
    pub total: Decimal,
    /// Number of distinct products (what the catalog's cart badge shows).
    pub line_count: usize,
    /// Number of units across all lines.
    pub item_count: u64,
}

impl CartSummary {
    /// Summarize `items`.
    #[must_use]
    pub fn of(items: &[LineItem]) -> Self {
        let subtotal = cart_total(items);
        let shipping = Decimal::ZERO;
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
            line_count: items.len(),
            item_count: items.iter().map(|i| u64::from(i.quantity)).sum(),
        }
    }

    /// Whether shipping is free (always, for now).
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
