//! The HTTP Order API client against canned server responses.

#![allow(clippy::unwrap_used)]

use craft_culture_cart::orders::DEFAULT_FAILURE_MESSAGE;
use craft_culture_cart::storage::keys;
use craft_culture_cart::{
    CartError, CartRepository, CartService, CheckoutScreen, CheckoutState, HttpOrderApi,
    LocalStorage, MemoryStorage, OrderApi, OrderError, OrderPayload,
};
use craft_culture_core::{OrderStatus, Username};
use craft_culture_integration_tests::{product, serve_once, signed_in, valid_form};
use secrecy::SecretString;

fn alice_with_cart() -> MemoryStorage {
    let storage = signed_in("alice");
    let cart = CartService::new(storage.clone());
    cart.add_item("alice", &product("a", 50, 0), 2).unwrap();
    cart.add_item("alice", &product("b", 30, 50), 1).unwrap();
    storage
}

fn alice_cart_len(storage: &MemoryStorage) -> usize {
    CartRepository::new(storage.clone())
        .load()
        .user_cart(&Username::parse("alice").unwrap())
        .len()
}

/// Place alice's order against a server answering `status` with `body`.
async fn checkout_against(
    status: &str,
    body: &str,
) -> (MemoryStorage, Result<String, CartError>, String) {
    let storage = alice_with_cart();
    let (config, request) = serve_once(status, body).await;
    let token = SecretString::from("jwt-token");
    let api = HttpOrderApi::new(&config, Some(&token)).unwrap();

    let mut screen = CheckoutScreen::mount(storage.clone()).unwrap();
    let result = screen
        .place_order(&valid_form(), &api)
        .await
        .map(|outcome| outcome.message());
    (storage, result, request.await.unwrap())
}

#[tokio::test]
async fn test_created_with_confirmation() {
    let (storage, result, request) = checkout_against(
        "201 Created",
        r#"{"_id":"6650a1","status":"Pending","estimatedDelivery":"2026-10-24T10:00:00Z"}"#,
    )
    .await;

    assert_eq!(
        result.unwrap(),
        "Order placed successfully! Estimated delivery: 24 Oct 2026"
    );
    assert_eq!(alice_cart_len(&storage), 0);

    let request = request.to_ascii_lowercase();
    assert!(request.starts_with("post /api/orders "));
    assert!(request.contains("authorization: bearer jwt-token"));
    assert!(request.contains(r#""username":"alice""#));
    assert!(request.contains(r#""totalamount":115.0"#));
}

#[tokio::test]
async fn test_confirmation_fields_decode() {
    let storage = alice_with_cart();
    let (config, _request) = serve_once(
        "201 Created",
        r#"{"_id":"6650a1","status":"Pending","estimatedDelivery":"2026-10-24T10:00:00Z"}"#,
    )
    .await;
    let api = HttpOrderApi::new(&config, None).unwrap();
    let alice = Username::parse("alice").unwrap();
    let items = CartService::new(storage).user_cart(&alice);
    let payload = OrderPayload::build(&valid_form(), alice, &items).unwrap();

    let confirmation = api.place_order(&payload).await.unwrap();
    assert_eq!(confirmation.id.unwrap().as_str(), "6650a1");
    assert_eq!(confirmation.status, Some(OrderStatus::Pending));
    assert!(confirmation.estimated_delivery.is_some());
}

#[tokio::test]
async fn test_rejection_carries_server_message() {
    let (storage, result, _) = checkout_against(
        "400 Bad Request",
        r#"{"message":"Insufficient stock for Product a"}"#,
    )
    .await;

    let Err(CartError::Order(OrderError::Rejected { status, message })) = result else {
        panic!("expected a rejected order");
    };
    assert_eq!(status, 400);
    assert_eq!(message, "Insufficient stock for Product a");
    assert_eq!(alice_cart_len(&storage), 2);
}

#[tokio::test]
async fn test_server_error_without_body_uses_default_message() {
    let (storage, result, _) = checkout_against("500 Internal Server Error", "").await;

    let Err(CartError::Order(err)) = result else {
        panic!("expected an order error");
    };
    assert!(matches!(err, OrderError::Rejected { status: 500, .. }));
    assert_eq!(err.user_message(), DEFAULT_FAILURE_MESSAGE);
    assert_eq!(alice_cart_len(&storage), 2);
}

#[tokio::test]
async fn test_blank_message_uses_default_message() {
    let (storage, result, _) =
        checkout_against("422 Unprocessable Entity", r#"{"message":"   "}"#).await;

    let Err(CartError::Order(err)) = result else {
        panic!("expected an order error");
    };
    assert_eq!(err.user_message(), DEFAULT_FAILURE_MESSAGE);
    assert!(storage.get_item(keys::CART).unwrap().is_some());
    assert_eq!(alice_cart_len(&storage), 2);
}

#[tokio::test]
async fn test_ok_with_empty_object_is_success() {
    let (storage, result, _) = checkout_against("200 OK", "{}").await;

    assert_eq!(
        result.unwrap(),
        "Order placed successfully! Estimated delivery: 5 business days"
    );
    assert_eq!(alice_cart_len(&storage), 0);
}

#[tokio::test]
async fn test_ok_with_unrecognized_body_is_success() {
    let (storage, result, _) = checkout_against("200 OK", "order received").await;

    assert!(result.is_ok());
    assert_eq!(alice_cart_len(&storage), 0);
}

#[tokio::test]
async fn test_state_returns_to_has_items_after_rejection() {
    let storage = alice_with_cart();
    let (config, _request) = serve_once("503 Service Unavailable", "").await;
    let api = HttpOrderApi::new(&config, None).unwrap();

    let mut screen = CheckoutScreen::mount(storage).unwrap();
    assert!(screen.place_order(&valid_form(), &api).await.is_err());
    assert_eq!(screen.state(), CheckoutState::HasItems);
}
