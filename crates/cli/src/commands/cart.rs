//! Cart commands for the signed-in user.
//!
//! # Usage
//!
//! ```bash
//! craft-cli cart add --id p1 --name "Brass Diya" --price 100 --offer 10
//! craft-cli cart update p1 2
//! craft-cli cart update p1 -1
//! craft-cli cart remove p1
//! craft-cli cart show
//! craft-cli cart clear
//! ```

use craft_culture_cart::{CartError, CartScreen, CatalogScreen, LocalStorage, format_price};
use craft_culture_core::{Discount, Price, PriceError, Product, ProductId, ProductStatus};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Price or offer out of range.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] PriceError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Product fields given on the command line.
#[derive(Debug, Clone)]
pub struct ProductArgs {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub offer: Decimal,
    pub available: bool,
}

impl TryFrom<ProductArgs> for Product {
    type Error = PriceError;

    fn try_from(args: ProductArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(args.id),
            name: args.name,
            image: args.image,
            price: Price::new(args.price)?,
            offer: Discount::new(args.offer)?,
            status: if args.available {
                ProductStatus::Available
            } else {
                ProductStatus::NotAvailable
            },
            category: None,
        })
    }
}

/// Print the signed-in user's cart.
///
/// # Errors
///
/// Returns error if nobody is signed in.
pub fn show<S: LocalStorage>(storage: S) -> Result<(), CartCommandError> {
    let screen = CartScreen::mount(storage)?;
    let view = screen.view();

    if view.is_empty() {
        tracing::info!("Cart for {} is empty", screen.user());
        return Ok(());
    }

    tracing::info!("Cart for {}:", screen.user());
    for item in &view.items {
        let offer = item
            .offer
            .as_ref()
            .map_or_else(String::new, |offer| format!(" ({offer})"));
        tracing::info!(
            "  [{}] {} x{} @ {}{} = {}",
            item.id,
            item.name,
            item.quantity,
            item.price,
            offer,
            item.line_price
        );
    }
    tracing::info!("  Subtotal: {}", view.subtotal);
    tracing::info!("  Shipping: {}", view.shipping);
    tracing::info!("  Total:    {} ({} items)", view.total, view.item_count);
    Ok(())
}

/// Add a product to the signed-in user's cart.
///
/// # Errors
///
/// Returns error if the product is invalid or unavailable, nobody is signed
/// in, or storage cannot be written.
pub fn add<S: LocalStorage>(
    storage: S,
    product: ProductArgs,
    quantity: u32,
) -> Result<(), CartCommandError> {
    let product = Product::try_from(product)?;
    let mut catalog = CatalogScreen::mount(storage);
    let badge = catalog.add_quantity_to_cart(&product, quantity)?;
    tracing::info!(
        "Added {} x{} to cart ({} products in cart)",
        product.name,
        quantity,
        badge
    );
    Ok(())
}

/// Change a line's quantity by `delta`.
///
/// # Errors
///
/// Returns error if nobody is signed in or storage cannot be written.
pub fn update<S: LocalStorage>(
    storage: S,
    product_id: &str,
    delta: i64,
) -> Result<(), CartCommandError> {
    let product_id = ProductId::new(product_id);
    let mut screen = CartScreen::mount(storage)?;
    screen.adjust(&product_id, delta)?;

    match screen.items().iter().find(|i| i.product_id == product_id) {
        Some(item) => tracing::info!("{} quantity is now {}", item.name, item.quantity),
        None => tracing::warn!("{} is not in the cart", product_id),
    }
    tracing::info!("Cart total: {}", format_price(screen.summary().total));
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns error if nobody is signed in or storage cannot be written.
pub fn remove<S: LocalStorage>(storage: S, product_id: &str) -> Result<(), CartCommandError> {
    let mut screen = CartScreen::mount(storage)?;
    screen.remove(&ProductId::new(product_id))?;
    tracing::info!(
        "Removed {} ({} products left)",
        product_id,
        screen.items().len()
    );
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns error if nobody is signed in or storage cannot be written.
pub fn clear<S: LocalStorage>(storage: S) -> Result<(), CartCommandError> {
    let mut screen = CartScreen::mount(storage)?;
    screen.clear()?;
    tracing::info!("Cart cleared for {}", screen.user());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use craft_culture_cart::MemoryStorage;
    use craft_culture_cart::storage::keys;

    use super::*;

    fn args(id: &str, available: bool) -> ProductArgs {
        ProductArgs {
            id: id.to_string(),
            name: "Brass Diya".to_string(),
            price: Decimal::from(100),
            image: String::new(),
            offer: Decimal::from(10),
            available,
        }
    }

    #[test]
    fn test_product_args_validation() {
        let mut bad = args("p1", true);
        bad.offer = Decimal::from(120);
        assert!(Product::try_from(bad).is_err());
        assert!(Product::try_from(args("p1", true)).unwrap().is_available());
    }

    #[test]
    fn test_add_update_remove() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::USERNAME, "alice").unwrap();

        add(storage.clone(), args("p1", true), 2).unwrap();
        update(storage.clone(), "p1", 1).unwrap();
        let screen = CartScreen::mount(storage.clone()).unwrap();
        assert_eq!(screen.items().first().unwrap().quantity, 3);
        assert_eq!(screen.summary().total, Decimal::from(270));

        remove(storage.clone(), "p1").unwrap();
        show(storage.clone()).unwrap();
        clear(storage).unwrap();
    }

    #[test]
    fn test_commands_require_login() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            add(storage.clone(), args("p1", true), 1),
            Err(CartCommandError::Cart(CartError::NotAuthenticated))
        ));
        assert!(matches!(
            show(storage),
            Err(CartCommandError::Cart(CartError::NotAuthenticated))
        ));
    }

    #[test]
    fn test_unavailable_product() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::USERNAME, "alice").unwrap();
        assert!(matches!(
            add(storage, args("p1", false), 1),
            Err(CartCommandError::Cart(CartError::ProductUnavailable(_)))
        ));
    }
}
