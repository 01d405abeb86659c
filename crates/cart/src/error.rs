//! Unified cart error type.
//!
//! Storage read problems never show up here: the repository degrades them to
//! an empty cart. What remains are conditions the calling screen has to act
//! on, most of them by navigating somewhere else (see [`CartError::navigation`]).

use thiserror::Error;

use crate::checkout::ValidationErrors;
use crate::orders::OrderError;
use crate::storage::StorageError;

/// Where the calling UI should send the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The login page.
    Login,
    /// The cart view.
    Cart,
    /// The checkout page.
    Checkout,
    /// The customer's order history, after a successful order.
    Orders,
    /// The product catalog.
    Catalog,
}

/// Errors returned by cart mutators and screens.
#[derive(Debug, Error)]
pub enum CartError {
    /// No user is signed in.
    #[error("Please log in to use your cart.")]
    NotAuthenticated,

    /// Checkout was started with an empty cart.
    #[error("Your cart is empty")]
    EmptyCartCheckout,

    /// A quantity of zero was requested.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// The product is not currently available.
    #[error("{0} is not available")]
    ProductUnavailable(String),

    /// The checkout form has invalid fields.
    #[error("Checkout form is invalid: {0}")]
    Validation(ValidationErrors),

    /// The cart could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The Order API did not accept the order.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

impl CartError {
    /// The navigation the calling UI must perform for this error, if any.
    #[must_use]
    pub const fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::NotAuthenticated => Some(Navigation::Login),
            Self::EmptyCartCheckout => Some(Navigation::Cart),
            _ => None,
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
