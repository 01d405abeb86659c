//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! craft-cli checkout --full-name "Alice Rao" --email alice@example.com \
//!     --phone 9876543210 --street "12 MG Road" --city Pune \
//!     --state Maharashtra --postal-code 411001 --payment cod
//! ```

use craft_culture_cart::{
    CartConfig, CartError, CartRepository, CheckoutForm, CheckoutScreen, HttpOrderApi,
    LocalStorage, OrderError,
};
use thiserror::Error;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The Order API client could not be built.
    #[error(transparent)]
    Client(#[from] OrderError),
}

/// Place an order for the signed-in user's cart.
///
/// # Errors
///
/// Returns error if nobody is signed in, the cart is empty, the form is
/// invalid, or the Order API does not accept the order.
pub async fn place<S: LocalStorage + Clone>(
    storage: S,
    config: &CartConfig,
    form: &CheckoutForm,
) -> Result<(), CheckoutError> {
    let mut screen = CheckoutScreen::mount(storage.clone())?;
    let summary = screen.view();
    tracing::info!(
        "Placing order for {} ({} items, total {})",
        screen.user(),
        summary.item_count,
        summary.total
    );

    let token = CartRepository::new(storage).auth_token();
    let api = HttpOrderApi::new(config, token.as_ref())?;

    match screen.place_order(form, &api).await {
        Ok(outcome) => {
            tracing::info!("{}", outcome.message());
            if let Some(id) = &outcome.confirmation.id {
                tracing::info!("Order ID: {}", id);
            }
            Ok(())
        }
        Err(CartError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                tracing::error!("  {}: {}", field, message);
            }
            Err(CartError::Validation(errors).into())
        }
        Err(CartError::Order(e)) => {
            tracing::error!("{}", e.user_message());
            Err(CartError::Order(e).into())
        }
        Err(e) => Err(e.into()),
    }
}
