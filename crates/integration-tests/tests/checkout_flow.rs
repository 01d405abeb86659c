//! Order placement against a fake Order API.

#![allow(clippy::unwrap_used)]

use craft_culture_cart::storage::keys;
use craft_culture_cart::{
    CartConfig, CartError, CartRepository, CartService, CheckoutScreen, CheckoutState,
    HttpOrderApi, LocalStorage, MemoryStorage, Navigation, OrderConfirmation, OrderError,
};
use craft_culture_core::Username;
use craft_culture_integration_tests::{
    FakeOrderApi, FakeResponse, product, sign_in, signed_in, valid_form,
};
use rust_decimal::Decimal;

fn alice_with_cart() -> MemoryStorage {
    let storage = signed_in("alice");
    let cart = CartService::new(storage.clone());
    cart.add_item("alice", &product("a", 50, 0), 2).unwrap();
    cart.add_item("alice", &product("b", 30, 50), 1).unwrap();
    cart.add_item("bob", &product("c", 99, 0), 1).unwrap();
    storage
}

#[tokio::test]
async fn test_successful_checkout_clears_only_that_cart() {
    let storage = alice_with_cart();
    let mut screen = CheckoutScreen::mount(storage.clone()).unwrap();
    assert_eq!(screen.summary().total, Decimal::from(115));

    let api = FakeOrderApi::accepting();
    let outcome = screen.place_order(&valid_form(), &api).await.unwrap();
    assert_eq!(outcome.navigation, Navigation::Orders);
    assert_eq!(screen.state(), CheckoutState::Empty);

    let store = CartRepository::new(storage).load();
    assert!(store.user_cart(&Username::parse("alice").unwrap()).is_empty());
    assert_eq!(store.user_cart(&Username::parse("bob").unwrap()).len(), 1);

    let sent = api.received();
    let payload = sent.first().unwrap();
    assert_eq!(payload.username.as_str(), "alice");
    assert_eq!(payload.items.len(), 2);
    assert_eq!(payload.total_amount, Decimal::from(115));
}

#[tokio::test]
async fn test_payload_wire_format() {
    let storage = alice_with_cart();
    let mut screen = CheckoutScreen::mount(storage).unwrap();
    let api = FakeOrderApi::accepting();
    screen.place_order(&valid_form(), &api).await.unwrap();

    let json = serde_json::to_value(api.received().first().unwrap()).unwrap();
    assert_eq!(json["totalAmount"], 115.0);
    assert_eq!(json["status"], "Pending");
    assert_eq!(json["paymentMethod"], "COD");
    assert_eq!(json["email"], "alice@example.com");
    assert_eq!(json["address"]["country"], "India");
    assert_eq!(json["items"][0]["_id"], "a");
    assert_eq!(json["items"][0]["price"], 50.0);
    assert_eq!(json["items"][1]["offer"], 50.0);
}

#[tokio::test]
async fn test_confirmation_with_delivery_date() {
    let storage = alice_with_cart();
    let mut screen = CheckoutScreen::mount(storage).unwrap();
    let confirmation: OrderConfirmation = serde_json::from_str(
        r#"{"_id":"6650a1","status":"Pending","estimatedDelivery":"2026-10-24T10:00:00Z"}"#,
    )
    .unwrap();
    let api = FakeOrderApi::with(FakeResponse::Accept(confirmation));

    let outcome = screen.place_order(&valid_form(), &api).await.unwrap();
    assert_eq!(
        outcome.message(),
        "Order placed successfully! Estimated delivery: 24 Oct 2026"
    );
}

#[tokio::test]
async fn test_rejected_order_leaves_cart_untouched() {
    let storage = alice_with_cart();
    let before = storage.get_item(keys::CART).unwrap();
    let mut screen = CheckoutScreen::mount(storage.clone()).unwrap();

    let api = FakeOrderApi::rejecting(400, "Insufficient stock for Product a");
    let err = screen.place_order(&valid_form(), &api).await.unwrap_err();
    let CartError::Order(order_error) = err else {
        panic!("expected order error");
    };
    assert_eq!(order_error.user_message(), "Insufficient stock for Product a");
    assert_eq!(screen.state(), CheckoutState::HasItems);
    assert_eq!(storage.get_item(keys::CART).unwrap(), before);

    // Retrying after the failure works.
    let api = FakeOrderApi::accepting();
    screen.place_order(&valid_form(), &api).await.unwrap();
    assert_eq!(screen.state(), CheckoutState::Empty);
}

#[tokio::test]
async fn test_unreachable_api_leaves_cart_untouched() {
    let storage = alice_with_cart();
    let before = storage.get_item(keys::CART).unwrap();
    let mut screen = CheckoutScreen::mount(storage.clone()).unwrap();

    let config = CartConfig::from_lookup(|key| {
        (key == "CRAFT_API_URL").then(|| "http://127.0.0.1:9".to_string())
    })
    .unwrap();
    let api = HttpOrderApi::new(&config, None).unwrap();

    let err = screen.place_order(&valid_form(), &api).await.unwrap_err();
    assert!(matches!(err, CartError::Order(OrderError::Http(_))));
    assert_eq!(storage.get_item(keys::CART).unwrap(), before);
}

#[test]
fn test_checkout_redirects() {
    let err = CheckoutScreen::mount(MemoryStorage::new()).unwrap_err();
    assert!(matches!(err, CartError::NotAuthenticated));
    assert_eq!(err.navigation(), Some(Navigation::Login));

    let storage = MemoryStorage::new();
    sign_in(&storage, "carol");
    let err = CheckoutScreen::mount(storage).unwrap_err();
    assert!(matches!(err, CartError::EmptyCartCheckout));
    assert_eq!(err.navigation(), Some(Navigation::Cart));
}

#[tokio::test]
async fn test_other_user_signed_in_meanwhile() {
    let storage = alice_with_cart();
    let mut screen = CheckoutScreen::mount(storage.clone()).unwrap();
    sign_in(&storage, "bob");

    let api = FakeOrderApi::accepting();
    let err = screen.place_order(&valid_form(), &api).await.unwrap_err();
    assert!(matches!(err, CartError::NotAuthenticated));
    assert!(api.received().is_empty());
}
