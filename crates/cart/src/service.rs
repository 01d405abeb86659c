//! Cart mutators.
//!
//! Every mutator is a read-modify-write of the whole persisted store: load it,
//! change the signed-in user's entry, save everything back. Nothing is held
//! between calls, and nothing coordinates two handles over the same storage;
//! see [`crate::repository`] for the consequences.

use craft_culture_core::{LineItem, Product, ProductId, Username};
use tracing::{debug, info, instrument};

use crate::error::{CartError, Result};
use crate::repository::CartRepository;
use crate::storage::LocalStorage;

/// Mutating operations on per-user carts.
#[derive(Debug, Clone)]
pub struct CartService<S> {
    repository: CartRepository<S>,
}

impl<S: LocalStorage> CartService<S> {
    /// Create a cart service over `storage`.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self {
            repository: CartRepository::new(storage),
        }
    }

    /// The repository this service writes through.
    #[must_use]
    pub const fn repository(&self) -> &CartRepository<S> {
        &self.repository
    }

    /// Load the store and return `username`'s items.
    #[must_use]
    pub fn user_cart(&self, username: &Username) -> Vec<LineItem> {
        self.repository.load().user_cart(username).to_vec()
    }

    /// Add `quantity` units of `product` to the user's cart.
    ///
    /// If the product is already in the cart its quantity grows, up to
    /// [`LineItem::MAX_QUANTITY`]; otherwise a new line is appended with the
    /// product's current name, image, price and offer. Returns the user's cart
    /// after the write.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotAuthenticated`] if `username` is blank
    /// - [`CartError::InvalidQuantity`] if `quantity` is zero
    /// - [`CartError::Storage`] if the store cannot be written
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&self, username: &str, product: &Product, quantity: u32) -> Result<Vec<LineItem>> {
        let username = authenticate(username)?;
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let mut store = self.repository.load();
        let items = store.user_cart_or_insert(username.clone());
        if let Some(existing) = items.iter_mut().find(|i| i.product_id == product.id) {
            existing.add_units(quantity);
            info!(quantity = existing.quantity, "Increased cart quantity");
        } else {
            items.push(LineItem::snapshot(product, quantity));
            info!(quantity, "Added product to cart");
        }

        self.repository.save(&store)?;
        Ok(store.user_cart(&username).to_vec())
    }

    /// Change the quantity of one line by `delta`.
    ///
    /// A change that would leave the quantity below 1 is ignored, as is an
    /// unknown product; removal goes through [`Self::remove_item`]. Returns the
    /// user's cart after the call.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotAuthenticated`] if `username` is blank
    /// - [`CartError::Storage`] if the store cannot be written
    #[instrument(skip(self))]
    pub fn update_quantity(
        &self,
        username: &str,
        product_id: &ProductId,
        delta: i64,
    ) -> Result<Vec<LineItem>> {
        let username = authenticate(username)?;

        let mut store = self.repository.load();
        let Some(item) = store
            .user_cart_mut(&username)
            .and_then(|items| items.iter_mut().find(|i| &i.product_id == product_id))
        else {
            debug!("Product not in cart, nothing to update");
            return Ok(store.user_cart(&username).to_vec());
        };

        let requested = i64::from(item.quantity).saturating_add(delta);
        if requested < 1 {
            debug!(current = item.quantity, requested, "Quantity floor reached, ignoring");
            return Ok(store.user_cart(&username).to_vec());
        }
        item.quantity = LineItem::capped_quantity(requested.unsigned_abs());
        info!(quantity = item.quantity, "Updated cart quantity");

        self.repository.save(&store)?;
        Ok(store.user_cart(&username).to_vec())
    }

    /// Remove a product from the user's cart. Removing an absent product is
    /// not an error. The user's entry is kept even when it becomes empty.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotAuthenticated`] if `username` is blank
    /// - [`CartError::Storage`] if the store cannot be written
    #[instrument(skip(self))]
    pub fn remove_item(&self, username: &str, product_id: &ProductId) -> Result<Vec<LineItem>> {
        let username = authenticate(username)?;

        let mut store = self.repository.load();
        let Some(items) = store.user_cart_mut(&username) else {
            debug!("User has no cart, nothing to remove");
            return Ok(Vec::new());
        };
        let before = items.len();
        items.retain(|i| &i.product_id != product_id);
        if items.len() < before {
            info!("Removed product from cart");
        }

        self.repository.save(&store)?;
        Ok(store.user_cart(&username).to_vec())
    }

    /// Delete the user's cart entry. Other users' carts are untouched.
    /// Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotAuthenticated`] if `username` is blank
    /// - [`CartError::Storage`] if the store cannot be written
    #[instrument(skip(self))]
    pub fn clear_cart(&self, username: &str) -> Result<()> {
        let username = authenticate(username)?;

        let mut store = self.repository.load();
        if store.remove_user(&username).is_none() {
            debug!("User has no cart, nothing to clear");
            return Ok(());
        }

        self.repository.save(&store)?;
        info!("Cleared cart");
        Ok(())
    }
}

fn authenticate(username: &str) -> Result<Username> {
    Username::parse(username).map_err(|_| CartError::NotAuthenticated)
}
