//! Catalog page: product list with category buttons, an add-to-cart button
//! and a cart badge.

use craft_culture_core::{Product, Username};
use tracing::{info, instrument};

use crate::error::{CartError, Result};
use crate::service::CartService;
use crate::storage::LocalStorage;

/// Category button that shows every product.
pub const ALL_CATEGORIES: &str = "All";

/// Category buttons in display order.
pub const CATEGORIES: [&str; 8] = [
    ALL_CATEGORIES,
    "Frames",
    "Wall Hanging",
    "Bag",
    "Pen Stand",
    "Jewellery",
    "Diyas",
    "Bottle Art",
];

/// Catalog page state.
#[derive(Debug)]
pub struct CatalogScreen<S> {
    service: CartService<S>,
    user: Option<Username>,
    badge_count: usize,
    products: Vec<Product>,
    active_category: String,
}

impl<S: LocalStorage> CatalogScreen<S> {
    /// Mount the catalog over `storage`. Browsing does not require a
    /// signed-in user.
    pub fn mount(storage: S) -> Self {
        let mut screen = Self {
            service: CartService::new(storage),
            user: None,
            badge_count: 0,
            products: Vec::new(),
            active_category: ALL_CATEGORIES.to_string(),
        };
        screen.refresh();
        screen
    }

    /// Re-read the signed-in user and their cart.
    pub fn refresh(&mut self) {
        self.user = self.service.repository().active_user();
        self.badge_count = self
            .user
            .as_ref()
            .map_or(0, |user| self.service.user_cart(user).len());
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&Username> {
        self.user.as_ref()
    }

    /// Number of distinct products in the signed-in user's cart.
    #[must_use]
    pub const fn badge_count(&self) -> usize {
        self.badge_count
    }

    /// Replace the product list with a fresh catalog response. The selected
    /// category is kept.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Select a category button. [`ALL_CATEGORIES`] clears the filter; any
    /// other name shows only products whose category matches it exactly.
    pub fn select_category(&mut self, category: &str) {
        category.clone_into(&mut self.active_category);
    }

    /// The selected category button.
    #[must_use]
    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    /// Products shown under the selected category, in catalog order.
    pub fn visible_products(&self) -> impl Iterator<Item = &Product> {
        let wanted = (self.active_category != ALL_CATEGORIES)
            .then_some(self.active_category.as_str());
        self.products
            .iter()
            .filter(move |p| wanted.is_none() || p.category.as_deref() == wanted)
    }

    /// Add one unit of `product` to the signed-in user's cart and return the
    /// new badge count.
    ///
    /// # Errors
    ///
    /// - [`CartError::ProductUnavailable`] if the product is not available
    /// - [`CartError::NotAuthenticated`] if nobody is signed in
    /// - [`CartError::Storage`] if the store cannot be written
    pub fn add_to_cart(&mut self, product: &Product) -> Result<usize> {
        self.add_quantity_to_cart(product, 1)
    }

    /// Like [`Self::add_to_cart`], for `quantity` units at once.
    ///
    /// # Errors
    ///
    /// As [`Self::add_to_cart`], plus [`CartError::InvalidQuantity`] if
    /// `quantity` is zero.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_quantity_to_cart(&mut self, product: &Product, quantity: u32) -> Result<usize> {
        if !product.is_available() {
            return Err(CartError::ProductUnavailable(product.name.clone()));
        }
        self.refresh();
        let Some(user) = self.user.as_ref() else {
            return Err(CartError::NotAuthenticated);
        };

        let items = self.service.add_item(user.as_str(), product, quantity)?;
        self.badge_count = items.len();
        info!(badge_count = self.badge_count, "Added to cart from catalog");
        Ok(self.badge_count)
    }
}
