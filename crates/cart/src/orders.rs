//! Order API client.
//!
//! Checkout hands a validated [`OrderPayload`] to an [`OrderApi`]. The HTTP
//! implementation posts it to `{api_url}/api/orders`; tests substitute their
//! own implementation.

use chrono::{DateTime, Utc};
use craft_culture_core::{OrderId, OrderStatus};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::checkout::OrderPayload;
use crate::config::CartConfig;

/// Message shown when the Order API gives no reason for a failure.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to place order. Please try again.";

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Order API refused the order.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Client setup failed.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl OrderError {
    /// Message suitable for showing to the customer.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Http(_) | Self::Config(_) => DEFAULT_FAILURE_MESSAGE,
        }
    }
}

/// What the Order API returns for an accepted order.
///
/// Every field is optional; an empty body still counts as success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    #[serde(rename = "_id", default)]
    pub id: Option<OrderId>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub estimated_delivery: Option<DateTime<Utc>>,
}

impl OrderConfirmation {
    /// Delivery estimate line for the confirmation message.
    #[must_use]
    pub fn delivery_note(&self) -> String {
        self.estimated_delivery.map_or_else(
            || "Estimated delivery: 5 business days".to_string(),
            |date| format!("Estimated delivery: {}", date.format("%d %b %Y")),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Accepts orders on behalf of the checkout screen.
pub trait OrderApi {
    /// Submit `order`.
    fn place_order(
        &self,
        order: &OrderPayload,
    ) -> impl Future<Output = Result<OrderConfirmation, OrderError>> + Send;
}

/// [`OrderApi`] backed by the Order API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpOrderApi {
    client: reqwest::Client,
    orders_url: Url,
}

impl HttpOrderApi {
    /// Create a client for the API at `config.api_url`, sending `token` as a
    /// bearer token when present.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value, the URL cannot
    /// be joined, or the HTTP client fails to build.
    pub fn new(config: &CartConfig, token: Option<&SecretString>) -> Result<Self, OrderError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&value)
                .map_err(|e| OrderError::Config(format!("Invalid auth token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let orders_url = config
            .orders_url()
            .map_err(|e| OrderError::Config(format!("Invalid API URL: {e}")))?;

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, orders_url })
    }

    /// The endpoint orders are posted to.
    #[must_use]
    pub const fn orders_url(&self) -> &Url {
        &self.orders_url
    }
}

impl OrderApi for HttpOrderApi {
    #[instrument(skip(self, order), fields(username = %order.username, items = order.items.len()))]
    async fn place_order(&self, order: &OrderPayload) -> Result<OrderConfirmation, OrderError> {
        let response = self
            .client
            .post(self.orders_url.clone())
            .json(order)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            warn!(status = status.as_u16(), %message, "Order rejected");
            return Err(OrderError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let confirmation = if body.trim().is_empty() {
            OrderConfirmation::default()
        } else {
            serde_json::from_str(&body).unwrap_or_else(|e| {
                warn!(error = %e, "Unrecognized order confirmation body");
                OrderConfirmation::default()
            })
        };
        debug!(order_id = ?confirmation.id, "Order accepted");
        Ok(confirmation)
    }
}
