//! Checkout form, order payload, and the cart-to-order state machine.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use craft_culture_core::{
    Discount, Email, LineItem, OrderStatus, PaymentMethod, Price, ProductId, Username,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculator::cart_total;

/// Country preselected on the checkout form.
pub const DEFAULT_COUNTRY: &str = "India";

/// Phone numbers: optional leading `+`, then at least 8 digits, spaces,
/// dashes or parentheses.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]{8,}$").expect("Invalid regex"));

// =============================================================================
// Form
// =============================================================================

/// Shipping address as entered on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for ShippingAddress {
    fn default() -> Self {
        Self {
            street: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// Raw checkout form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

/// Field-level validation failures, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, &'static str>);

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    /// Failed fields and their messages, ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().copied().collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl CheckoutForm {
    /// Check every field and collect all failures.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming each invalid field.
    pub fn validate(&self) -> Result<Email, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.full_name.trim().is_empty() {
            errors.add("fullName", "Full name is required");
        }
        let email = Email::parse(&self.email);
        if email.is_err() {
            errors.add("email", "Invalid email format");
        }
        if !PHONE_RE.is_match(&self.phone) {
            errors.add("phone", "Invalid phone number format");
        }
        if self.address.street.trim().is_empty() {
            errors.add("street", "Street address is required");
        }
        if self.address.city.trim().is_empty() {
            errors.add("city", "City is required");
        }
        if self.address.state.trim().is_empty() {
            errors.add("state", "State is required");
        }
        if self.address.postal_code.trim().is_empty() {
            errors.add("postalCode", "Postal code is required");
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Order payload
// =============================================================================

/// One ordered product, as the Order API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub image: String,
    pub offer: Discount,
}

impl From<&LineItem> for OrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.product_id.clone(),
            name: item.name.clone(),
            price: item.unit_price,
            quantity: item.quantity,
            image: item.image.clone(),
            offer: item.discount,
        }
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub full_name: String,
    pub email: Email,
    pub phone: String,
    pub address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub username: Username,
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
}

impl OrderPayload {
    /// Validate `form` and combine it with the user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if the form is invalid.
    pub fn build(
        form: &CheckoutForm,
        username: Username,
        items: &[LineItem],
    ) -> Result<Self, ValidationErrors> {
        let email = form.validate()?;
        let address = ShippingAddress {
            street: form.address.street.trim().to_string(),
            city: form.address.city.trim().to_string(),
            state: form.address.state.trim().to_string(),
            postal_code: form.address.postal_code.trim().to_string(),
            country: form.address.country.trim().to_string(),
        };

        Ok(Self {
            full_name: form.full_name.trim().to_string(),
            email,
            phone: form.phone.trim().to_string(),
            address,
            payment_method: form.payment_method,
            username,
            items: items.iter().map(OrderItem::from).collect(),
            total_amount: cart_total(items),
            status: OrderStatus::Pending,
        })
    }
}

// =============================================================================
// State machine
// =============================================================================

/// Where a user's cart is on the way to becoming an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Empty,
    HasItems,
    /// The order request is in flight; the cart is not modified.
    CheckoutPending,
    /// The Order API accepted the order; the cart is about to be cleared.
    OrderPlaced,
}

/// Something that happened to the cart or the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// Items were added, updated or removed; `remaining` lines are left.
    ItemsChanged { remaining: usize },
    /// The user's cart entry was deleted.
    Cleared,
    /// The user proceeded from the cart to checkout.
    ProceedToCheckout,
    /// The Order API reported success.
    OrderSucceeded,
    /// The Order API call failed.
    OrderFailed,
}

impl CheckoutState {
    /// State for a cart holding `items`.
    #[must_use]
    pub const fn for_cart(items: &[LineItem]) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::HasItems
        }
    }

    /// Apply `event`, or return `None` if the transition is not allowed.
    #[must_use]
    pub const fn next(self, event: CheckoutEvent) -> Option<Self> {
        use CheckoutEvent as E;
        match (self, event) {
            (Self::Empty | Self::HasItems, E::ItemsChanged { remaining: 0 })
            | (Self::HasItems | Self::OrderPlaced, E::Cleared) => Some(Self::Empty),
            (Self::Empty | Self::HasItems, E::ItemsChanged { .. })
            | (Self::CheckoutPending, E::OrderFailed) => Some(Self::HasItems),
            (Self::HasItems, E::ProceedToCheckout) => Some(Self::CheckoutPending),
            (Self::CheckoutPending, E::OrderSucceeded) => Some(Self::OrderPlaced),
            _ => None,
        }
    }
}
