//! Cart page: line list with quantity controls, remove buttons and the
//! order summary.

use craft_culture_core::{LineItem, ProductId, Username};
use tracing::{debug, instrument};

use super::CartView;
use crate::calculator::CartSummary;
use crate::checkout::CheckoutState;
use crate::error::{CartError, Navigation, Result};
use crate::service::CartService;
use crate::storage::LocalStorage;

/// Cart page state for the signed-in user.
#[derive(Debug)]
pub struct CartScreen<S> {
    service: CartService<S>,
    user: Username,
    items: Vec<LineItem>,
}

impl<S: LocalStorage> CartScreen<S> {
    /// Mount the cart page over `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotAuthenticated`] if nobody is signed in.
    pub fn mount(storage: S) -> Result<Self> {
        let service = CartService::new(storage);
        let user = service
            .repository()
            .active_user()
            .ok_or(CartError::NotAuthenticated)?;
        let items = service.user_cart(&user);
        debug!(%user, lines = items.len(), "Mounted cart screen");
        Ok(Self {
            service,
            user,
            items,
        })
    }

    /// Re-read the user's cart from storage.
    pub fn refresh(&mut self) {
        self.items = self.service.user_cart(&self.user);
    }

    /// The user this screen belongs to.
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

    /// Display data for the lines as last read.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::of(&self.items)
    }

    /// [`CheckoutState::Empty`] or [`CheckoutState::HasItems`].
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        CheckoutState::for_cart(&self.items)
    }

    /// Change one line's quantity by `delta`. A change that would take the
    /// quantity below 1 is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the store cannot be written.
    pub fn adjust(&mut self, product_id: &ProductId, delta: i64) -> Result<()> {
        self.items = self
            .service
            .update_quantity(self.user.as_str(), product_id, delta)?;
        Ok(())
    }

    /// The "+" button.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the store cannot be written.
    pub fn increment(&mut self, product_id: &ProductId) -> Result<()> {
        self.adjust(product_id, 1)
    }

    /// The "−" button. Does nothing at quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the store cannot be written.
    pub fn decrement(&mut self, product_id: &ProductId) -> Result<()> {
        self.adjust(product_id, -1)
    }

    /// The remove button.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the store cannot be written.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<()> {
        self.items = self.service.remove_item(self.user.as_str(), product_id)?;
        Ok(())
    }

    /// Empty the cart by deleting the user's entry.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the store cannot be written.
    pub fn clear(&mut self) -> Result<()> {
        self.service.clear_cart(self.user.as_str())?;
        self.items.clear();
        Ok(())
    }

    /// The "Proceed to Checkout" button.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCartCheckout`] if the cart is empty when
    /// re-read.
    #[instrument(skip(self), fields(user = %self.user))]
    pub fn proceed_to_checkout(&mut self) -> Result<Navigation> {
        self.refresh();
        if self.items.is_empty() {
            return Err(CartError::EmptyCartCheckout);
        }
        Ok(Navigation::Checkout)
    }
}
