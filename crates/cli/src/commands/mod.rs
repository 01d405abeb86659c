//! Command implementations.

pub mod cart;
pub mod checkout;
pub mod session;

use craft_culture_cart::{CartError, Navigation};

/// Log what the user should do after a cart error that asks for navigation.
pub fn log_navigation_hint(error: &CartError) {
    match error.navigation() {
        Some(Navigation::Login) => tracing::info!("Sign in first: craft-cli login <username>"),
        Some(Navigation::Cart) => tracing::info!("Add something first: craft-cli cart add ..."),
        _ => {}
    }
}
