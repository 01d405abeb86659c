//! Checkout page: shipping form, order summary and order placement.

use craft_culture_core::{LineItem, Username};
use tracing::{debug, error, info, instrument, warn};

use super::CartView;
use crate::calculator::CartSummary;
use crate::checkout::{CheckoutEvent, CheckoutForm, CheckoutState, OrderPayload};
use crate::error::{CartError, Navigation, Result};
use crate::orders::{OrderApi, OrderConfirmation};
use crate::service::CartService;
use crate::storage::LocalStorage;

/// Result of a successful order placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub confirmation: OrderConfirmation,
    /// Where to send the user next.
    pub navigation: Navigation,
}

impl CheckoutOutcome {
    /// Confirmation message shown after the order is accepted.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Order placed successfully! {}",
            self.confirmation.delivery_note()
        )
    }
}

/// Checkout page state for the signed-in user.
#[derive(Debug)]
pub struct CheckoutScreen<S> {
    service: CartService<S>,
    user: Username,
    items: Vec<LineItem>,
    state: CheckoutState,
}

impl<S: LocalStorage> CheckoutScreen<S> {
    /// Mount the checkout page over `storage`.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotAuthenticated`] if nobody is signed in
    /// - [`CartError::EmptyCartCheckout`] if the user's cart is empty
    pub fn mount(storage: S) -> Result<Self> {
        let service = CartService::new(storage);
        let user = service
            .repository()
            .active_user()
            .ok_or(CartError::NotAuthenticated)?;
        let items = service.user_cart(&user);
        if items.is_empty() {
            return Err(CartError::EmptyCartCheckout);
        }
        Ok(Self {
            service,
            user,
            items,
            state: CheckoutState::HasItems,
        })
    }

    /// The user placing the order.
    #[must_use]
    pub const fn user(&self) -> &Username {
        &self.user
    }

    /// Lines as last read.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Totals for the lines as last read.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.items)
    }

    /// Display data for the order summary.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::of(&self.items)
    }

    /// Current checkout state.
    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    fn advance(&mut self, event: CheckoutEvent) {
        match self.state.next(event) {
            Some(next) => self.state = next,
            None => warn!(state = ?self.state, ?event, "Ignoring invalid checkout transition"),
        }
    }

    /// Validate `form`, submit the order through `api`, and clear the cart
    /// once the order is accepted.
    ///
    /// The cart is re-read right before submission, so the order contains
    /// exactly what is persisted at that moment. On any failure the cart is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// - [`CartError::Validation`] if the form is invalid
    /// - [`CartError::NotAuthenticated`] if the user signed out meanwhile
    /// - [`CartError::EmptyCartCheckout`] if the cart was emptied meanwhile
    /// - [`CartError::Order`] if the Order API call failed
    #[instrument(skip(self, form, api), fields(user = %self.user))]
    pub async fn place_order(
        &mut self,
        form: &CheckoutForm,
        api: &impl OrderApi,
    ) -> Result<CheckoutOutcome> {
        if self.service.repository().active_user().as_ref() != Some(&self.user) {
            return Err(CartError::NotAuthenticated);
        }
        self.items = self.service.user_cart(&self.user);
        let synced = CheckoutState::for_cart(&self.items);
        if synced != self.state {
            debug!(from = ?self.state, to = ?synced, "Checkout state re-synced with stored cart");
            self.state = synced;
        }
        if self.items.is_empty() {
            return Err(CartError::EmptyCartCheckout);
        }

        let payload = OrderPayload::build(form, self.user.clone(), &self.items)
            .map_err(CartError::Validation)?;

        self.advance(CheckoutEvent::ProceedToCheckout);
        let confirmation = match api.place_order(&payload).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                warn!(error = %e, "Order placement failed, cart kept");
                self.advance(CheckoutEvent::OrderFailed);
                return Err(e.into());
            }
        };
        self.advance(CheckoutEvent::OrderSucceeded);
        info!(order_id = ?confirmation.id, total = %payload.total_amount, "Order placed");

        // The order exists now; a failed clear must not turn it into an error.
        match self.service.clear_cart(self.user.as_str()) {
            Ok(()) => {
                self.items.clear();
                self.advance(CheckoutEvent::Cleared);
            }
            Err(e) => error!(error = %e, "Order placed but cart could not be cleared"),
        }

        Ok(CheckoutOutcome {
            confirmation,
            navigation: Navigation::Orders,
        })
    }
}
