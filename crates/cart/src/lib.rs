//! Craft Culture Cart - Client-side cart store and checkout hand-off.
//!
//! Carts for every user of a client live under a single `"cart"` key of a
//! browser-style local storage, as one JSON object keyed by username. This
//! crate owns that value: reading it defensively, mutating one user's entry,
//! computing totals, and handing a validated order to the Order API.
//!
//! # Architecture
//!
//! ```text
//! screens (catalog, cart, checkout)
//!     |                 \
//! service (mutators)     orders (Order API client)
//!     |
//! repository (whole-store load/save)
//!     |
//! storage (LocalStorage: memory or JSON file)
//! ```
//!
//! # Modules
//!
//! - [`storage`] - `LocalStorage` trait and its memory and file backends
//! - [`repository`] - Load and save of the whole cart store
//! - [`calculator`] - Line and cart totals
//! - [`service`] - Add, update, remove and clear
//! - [`checkout`] - Checkout form validation, order payload, state machine
//! - [`orders`] - Order API client
//! - [`screens`] - Catalog, cart and checkout page state
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod calculator;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orders;
pub mod repository;
pub mod screens;
pub mod service;
pub mod storage;

pub use calculator::{CartSummary, cart_total, line_total};
pub use checkout::{
    CheckoutEvent, CheckoutForm, CheckoutState, OrderItem, OrderPayload, ShippingAddress,
    ValidationErrors,
};
pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Navigation, Result};
pub use orders::{HttpOrderApi, OrderApi, OrderConfirmation, OrderError};
pub use repository::{CartRepository, LoadError};
pub use screens::{CartScreen, CatalogScreen, CheckoutOutcome, CheckoutScreen, format_price};
pub use service::CartService;
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError};
