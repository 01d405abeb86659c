//! Several handles ("tabs") over one shared storage.
//!
//! Each mutator is an unsynchronized read-modify-write of the whole store.
//! Sequential use through different handles is consistent; an interleaved
//! write from a stale snapshot overwrites everything written since.

#![allow(clippy::unwrap_used)]

use craft_culture_cart::{CartRepository, CartScreen, CartService, MemoryStorage};
use craft_culture_core::{LineItem, ProductId, Username};
use craft_culture_integration_tests::{product, signed_in};

fn user(name: &str) -> Username {
    Username::parse(name).unwrap()
}

#[test]
fn test_sequential_tabs_see_each_other() {
    let storage = MemoryStorage::new();
    let tab_a = CartService::new(storage.clone());
    let tab_b = CartService::new(storage.clone());

    tab_a.add_item("alice", &product("p1", 10, 0), 1).unwrap();
    tab_b.add_item("alice", &product("p1", 10, 0), 2).unwrap();
    tab_a.add_item("bob", &product("p2", 10, 0), 1).unwrap();

    assert_eq!(
        tab_b.user_cart(&user("alice")).first().unwrap().quantity,
        3
    );
    assert_eq!(tab_b.user_cart(&user("bob")).len(), 1);
}

#[test]
fn test_stale_snapshot_overwrites_whole_store() {
    let storage = MemoryStorage::new();
    let repo_a = CartRepository::new(storage.clone());
    let tab_b = CartService::new(storage.clone());

    // Tab A reads the store, then tab B writes bob's cart.
    let mut stale = repo_a.load();
    tab_b.add_item("bob", &product("p2", 10, 0), 1).unwrap();

    // Tab A writes alice's cart from its stale snapshot: bob's write is lost.
    stale
        .user_cart_or_insert(user("alice"))
        .push(LineItem::snapshot(&product("p1", 10, 0), 1));
    repo_a.save(&stale).unwrap();

    let store = repo_a.load();
    assert_eq!(store.user_cart(&user("alice")).len(), 1);
    assert!(!store.contains_user(&user("bob")));
}

#[test]
fn test_open_screen_is_stale_until_refresh() {
    let storage = signed_in("alice");
    CartService::new(storage.clone())
        .add_item("alice", &product("p1", 10, 0), 1)
        .unwrap();

    let mut screen = CartScreen::mount(storage.clone()).unwrap();
    CartService::new(storage)
        .add_item("alice", &product("p2", 20, 0), 1)
        .unwrap();
    assert_eq!(screen.items().len(), 1);

    screen.refresh();
    assert_eq!(screen.items().len(), 2);
}

#[test]
fn test_screen_mutation_rereads_before_writing() {
    let storage = signed_in("alice");
    let mut screen = CartScreen::mount(storage.clone()).unwrap();

    // Another tab adds a product after the screen mounted.
    CartService::new(storage.clone())
        .add_item("alice", &product("p1", 10, 0), 2)
        .unwrap();

    // The screen's mutator loads the current store, so nothing is lost.
    screen.increment(&ProductId::new("p1")).unwrap();
    assert_eq!(screen.items().first().unwrap().quantity, 3);
}
