//! Integration tests for the Craft Culture cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p craft-culture-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Mutator laws and end-to-end cart scenarios
//! - `multi_tab` - Several handles sharing one storage
//! - `checkout_flow` - Order placement against a fake Order API
//! - `order_api` - The HTTP Order API client against canned responses
//! - `file_storage` - The cart over a JSON file on disk
//!
//! This crate only holds shared fixtures.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use craft_culture_cart::storage::keys;
use craft_culture_cart::{
    CartConfig, CheckoutForm, LocalStorage, MemoryStorage, OrderApi, OrderConfirmation,
    OrderError, OrderPayload, ShippingAddress,
};
use craft_culture_core::{Discount, PaymentMethod, Price, Product, ProductId, ProductStatus};
use rust_decimal::Decimal;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// An available product with whole-rupee price and offer.
#[must_use]
pub fn product(id: &str, price: i64, offer: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        image: format!("https://cdn.example.com/{id}.jpg"),
        price: Price::new(Decimal::from(price)).unwrap(),
        offer: Discount::new(Decimal::from(offer)).unwrap(),
        status: ProductStatus::Available,
        category: Some("Handicrafts".to_string()),
    }
}

/// In-memory storage with `username` signed in.
#[must_use]
pub fn signed_in(username: &str) -> MemoryStorage {
    let storage = MemoryStorage::new();
    sign_in(&storage, username);
    storage
}

/// Write `username` as the signed-in user of `storage`.
pub fn sign_in(storage: &impl LocalStorage, username: &str) {
    storage.set_item(keys::USERNAME, username).unwrap();
}

/// A checkout form that passes validation.
#[must_use]
pub fn valid_form() -> CheckoutForm {
    CheckoutForm {
        full_name: "Alice Rao".to_string(),
        email: "alice@example.com".to_string(),
        phone: "+91 98765 43210".to_string(),
        address: ShippingAddress {
            street: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            postal_code: "411001".to_string(),
            ..ShippingAddress::default()
        },
        payment_method: PaymentMethod::CashOnDelivery,
    }
}

/// How [`FakeOrderApi`] answers.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Accept(OrderConfirmation),
    Reject { status: u16, message: String },
}

/// [`OrderApi`] that records payloads and answers with a fixed response.
#[derive(Debug)]
pub struct FakeOrderApi {
    response: FakeResponse,
    received: Mutex<Vec<OrderPayload>>,
}

impl FakeOrderApi {
    /// Accept every order with an empty confirmation.
    #[must_use]
    pub fn accepting() -> Self {
        Self::with(FakeResponse::Accept(OrderConfirmation::default()))
    }

    /// Reject every order with `status` and `message`.
    #[must_use]
    pub fn rejecting(status: u16, message: &str) -> Self {
        Self::with(FakeResponse::Reject {
            status,
            message: message.to_string(),
        })
    }

    /// Answer every order with `response`.
    #[must_use]
    pub const fn with(response: FakeResponse) -> Self {
        Self {
            response,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Payloads received so far.
    #[must_use]
    pub fn received(&self) -> Vec<OrderPayload> {
        self.received.lock().unwrap().clone()
    }
}

impl OrderApi for FakeOrderApi {
    async fn place_order(&self, order: &OrderPayload) -> Result<OrderConfirmation, OrderError> {
        self.received.lock().unwrap().push(order.clone());
        match &self.response {
            FakeResponse::Accept(confirmation) => Ok(confirmation.clone()),
            FakeResponse::Reject { status, message } => Err(OrderError::Rejected {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

/// Serve exactly one HTTP exchange on a local port.
///
/// Answers the first request with `status` (e.g. `"201 Created"`) and `body`,
/// then resolves the handle to the raw request text. The returned config
/// points the Order API client at the listener.
pub async fn serve_once(status: &str, body: &str) -> (CartConfig, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0_u8; 4096];
        while !request_complete(&request) {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(buf.get(..n).unwrap());
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8(request).unwrap()
    });

    let config =
        CartConfig::from_lookup(|key| (key == "CRAFT_API_URL").then(|| format!("http://{addr}")))
            .unwrap();
    (config, handle)
}

/// Whether `raw` holds a full request head plus its `Content-Length` body.
fn request_complete(raw: &[u8]) -> bool {
    let Some(head_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(raw.get(..head_end).unwrap());
    let body_len = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    raw.len() >= head_end + 4 + body_len
}
