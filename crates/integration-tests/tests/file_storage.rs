//! The cart over a JSON file, as the CLI uses it.

#![allow(clippy::unwrap_used)]

use craft_culture_cart::storage::keys;
use craft_culture_cart::{
    CartRepository, CartScreen, CartService, CatalogScreen, FileStorage, LocalStorage,
    StorageError,
};
use craft_culture_core::{ProductId, Username};
use craft_culture_integration_tests::{product, sign_in};
use rust_decimal::Decimal;

#[test]
fn test_cart_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state/local-storage.json");

    let storage = FileStorage::new(&path);
    sign_in(&storage, "alice");
    let mut catalog = CatalogScreen::mount(storage);
    catalog.add_to_cart(&product("p1", 100, 10)).unwrap();
    catalog.add_to_cart(&product("p1", 100, 10)).unwrap();

    // A separate handle, as a later CLI invocation would open.
    let reopened = CartScreen::mount(FileStorage::new(&path)).unwrap();
    assert_eq!(reopened.items().first().unwrap().quantity, 2);
    assert_eq!(reopened.summary().total, Decimal::from(180));
}

#[test]
fn test_cart_value_is_a_json_string_under_cart_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");
    let storage = FileStorage::new(&path);
    CartService::new(storage.clone())
        .add_item("alice", &product("p1", 25, 0), 4)
        .unwrap();

    let file: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let cart_raw = file[keys::CART].as_str().unwrap();
    let cart: serde_json::Value = serde_json::from_str(cart_raw).unwrap();
    assert_eq!(cart["alice"][0]["quantity"], 4);
    assert_eq!(cart["alice"][0]["price"], 25.0);
}

#[test]
fn test_other_keys_are_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("local-storage.json"));
    sign_in(&storage, "alice");
    storage.set_item(keys::TOKEN, "jwt").unwrap();

    let cart = CartService::new(storage.clone());
    cart.add_item("alice", &product("p1", 1, 0), 1).unwrap();
    cart.remove_item("alice", &ProductId::new("p1")).unwrap();
    cart.clear_cart("alice").unwrap();

    assert_eq!(storage.get_item(keys::TOKEN).unwrap().as_deref(), Some("jwt"));
    assert_eq!(
        CartRepository::new(storage).active_user(),
        Some(Username::parse("alice").unwrap())
    );
}

#[test]
fn test_garbage_file_reads_empty_but_write_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");
    std::fs::write(&path, "<<not json>>").unwrap();

    let cart = CartService::new(FileStorage::new(&path));
    assert!(cart.repository().load().is_empty());

    let err = cart.add_item("alice", &product("p1", 1, 0), 1).unwrap_err();
    assert!(matches!(
        err,
        craft_culture_cart::CartError::Storage(StorageError::Format { .. })
    ));
    // The file is left as it was.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "<<not json>>");
}
