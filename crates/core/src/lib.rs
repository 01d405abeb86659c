//! Domain types shared by the Craft Culture cart and its CLI.
//!
//! Products, line items, the per-user cart store, and the validated newtypes
//! they are built from. Nothing here touches storage or the network; the
//! `craft-culture-cart` crate owns persistence and checkout.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
