//! Persisted cart structures.
//!
//! The whole cart store lives under one storage key as a JSON object mapping
//! each username to an array of line items:
//!
//! ```json
//! { "alice": [ { "_id": "p1", "name": "Diya", "image": "diya.jpg",
//!                "price": 100, "offer": 10, "quantity": 3 } ] }
//! ```
//!
//! Decoding is defensive. A value that is not a JSON object is reported as
//! [`CorruptedStore`]; malformed users or items inside an otherwise valid
//! object are skipped and counted in [`DecodedStore`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::price::{Discount, Price};
use super::product::Product;
use super::username::Username;

/// The persisted value is not a cart store at all.
#[derive(thiserror::Error, Debug)]
pub enum CorruptedStore {
    /// The value is not valid JSON.
    #[error("cart store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The value is JSON but not an object keyed by username.
    #[error("cart store is not a JSON object")]
    NotAnObject,
}

/// One product in a user's cart, with the display and pricing fields copied
/// from the product when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "_id")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    #[serde(rename = "offer", default, deserialize_with = "discount_or_none")]
    pub discount: Discount,
    /// Between 1 and [`LineItem::MAX_QUANTITY`].
    #[serde(default = "one", deserialize_with = "quantity_or_one")]
    pub quantity: u32,
}

const fn one() -> u32 {
    1
}

/// Missing, `null` or `0` quantities were written by older storefront builds
/// and count as a single unit. Oversized ones are capped.
fn quantity_or_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let quantity = Option::<u32>::deserialize(deserializer)?;
    Ok(LineItem::capped_quantity(u64::from(quantity.unwrap_or(1))))
}

fn discount_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Discount, D::Error> {
    Ok(Option::<Discount>::deserialize(deserializer)?.unwrap_or_default())
}

impl LineItem {
    /// Most units one line can hold.
    pub const MAX_QUANTITY: u32 = 1_000_000;

    /// Clamp a requested unit count into `1..=MAX_QUANTITY`.
    #[must_use]
    pub fn capped_quantity(requested: u64) -> u32 {
        let capped = requested.clamp(1, u64::from(Self::MAX_QUANTITY));
        u32::try_from(capped).unwrap_or(Self::MAX_QUANTITY)
    }

    /// Add `units` to this line, stopping at [`Self::MAX_QUANTITY`].
    pub fn add_units(&mut self, units: u32) {
        self.quantity = Self::capped_quantity(u64::from(self.quantity) + u64::from(units));
    }

    /// Snapshot a catalog product into a new line item.
    ///
    /// Name, image, price and offer are copied now and never refreshed from
    /// the catalog afterwards. `quantity` is clamped into `1..=MAX_QUANTITY`.
    #[must_use]
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            discount: product.offer,
            quantity: Self::capped_quantity(u64::from(quantity)),
        }
    }
}

/// Result of decoding a persisted cart store.
#[derive(Debug, Default)]
pub struct DecodedStore {
    pub store: CartStore,
    /// Entries whose key was a blank username or whose value was not an array.
    pub skipped_users: usize,
    /// Items that failed to decode or validate.
    pub skipped_items: usize,
    /// Items folded into an earlier item with the same product id.
    pub merged_items: usize,
}

impl DecodedStore {
    /// Whether anything in the persisted value had to be dropped or repaired.
    #[must_use]
    pub const fn was_repaired(&self) -> bool {
        self.skipped_users > 0 || self.skipped_items > 0 || self.merged_items > 0
    }
}

/// All users' carts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CartStore {
    carts: BTreeMap<Username, Vec<LineItem>>,
}

impl CartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a persisted store.
    ///
    /// # Errors
    ///
    /// Returns [`CorruptedStore`] if `raw` is not JSON or not a JSON object.
    /// Problems below the top level are repaired instead, see [`DecodedStore`].
    pub fn decode(raw: &str) -> Result<DecodedStore, CorruptedStore> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let serde_json::Value::Object(entries) = value else {
            return Err(CorruptedStore::NotAnObject);
        };

        let mut decoded = DecodedStore::default();
        for (key, value) in entries {
            let (Ok(username), serde_json::Value::Array(raw_items)) =
                (Username::parse(&key), value)
            else {
                decoded.skipped_users += 1;
                continue;
            };

            let items = decoded.store.carts.entry(username).or_default();
            for raw_item in raw_items {
                let Ok(item) = serde_json::from_value::<LineItem>(raw_item) else {
                    decoded.skipped_items += 1;
                    continue;
                };
                if let Some(existing) = items.iter_mut().find(|i| i.product_id == item.product_id)
                {
                    existing.add_units(item.quantity);
                    decoded.merged_items += 1;
                } else {
                    items.push(item);
                }
            }
        }

        Ok(decoded)
    }

    /// Encode the whole store for persistence.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// A user's line items in insertion order; empty if the user has no cart.
    #[must_use]
    pub fn user_cart(&self, username: &Username) -> &[LineItem] {
        self.carts.get(username).map_or(&[], Vec::as_slice)
    }

    /// Mutable access to a user's line items, if the user has a cart.
    pub fn user_cart_mut(&mut self, username: &Username) -> Option<&mut Vec<LineItem>> {
        self.carts.get_mut(username)
    }

    /// Mutable access to a user's line items, creating an empty cart first.
    pub fn user_cart_or_insert(&mut self, username: Username) -> &mut Vec<LineItem> {
        self.carts.entry(username).or_default()
    }

    /// Remove a user's cart entirely, returning its items.
    pub fn remove_user(&mut self, username: &Username) -> Option<Vec<LineItem>> {
        self.carts.remove(username)
    }

    /// Whether the user has a cart entry (possibly empty).
    #[must_use]
    pub fn contains_user(&self, username: &Username) -> bool {
        self.carts.contains_key(username)
    }

    /// Usernames with a cart entry.
    pub fn users(&self) -> impl Iterator<Item = &Username> {
        self.carts.keys()
    }

    /// Number of users with a cart entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    /// Whether no user has a cart entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}
