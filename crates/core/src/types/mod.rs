//! Core types for Craft Culture.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;
pub mod username;

pub use cart::{CartStore, CorruptedStore, DecodedStore, LineItem};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CURRENCY_SYMBOL, Discount, Price, PriceError};
pub use product::Product;
pub use status::*;
pub use username::{Username, UsernameError};
