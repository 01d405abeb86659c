//! Type-safe price and discount representation using decimal arithmetic.
//!
//! Both types are stored as plain JSON numbers (the backend and the persisted
//! cart use `price` and `offer` number fields), but are held as [`Decimal`] in
//! memory so that cart totals are exact.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Symbol used when formatting amounts for display (Indian rupee).
pub const CURRENCY_SYMBOL: &str = "₹";

/// Errors raised when constructing a [`Price`] or [`Discount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The price is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The price is above [`Price::MAX_RUPEES`].
    #[error("price cannot exceed {max}: {0}", max = Price::MAX_RUPEES)]
    TooLarge(Decimal),
    /// The discount percentage is outside 0..=100.
    #[error("discount must be between 0 and 100 percent: {0}")]
    DiscountOutOfRange(Decimal),
}

/// A non-negative unit price in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Upper bound on a unit price. Together with the line item quantity cap
    /// it keeps every cart total well inside `Decimal` range.
    pub const MAX_RUPEES: i64 = 1_000_000_000_000;

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// - [`PriceError::Negative`] if `amount` is below zero
    /// - [`PriceError::TooLarge`] if `amount` is above [`Self::MAX_RUPEES`]
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Decimal::from(Self::MAX_RUPEES) {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// The amount in rupees.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{}", self.0)
    }
}

/// Whole amounts go out as JSON integers, the way the web client writes them.
fn serialize_number<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    match value.fract().is_zero().then(|| value.to_i64()).flatten() {
        Some(whole) => serializer.serialize_i64(whole),
        None => rust_decimal::serde::float::serialize(value, serializer),
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

/// A percentage discount ("offer") between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Discount(Decimal);

impl Discount {
    /// No discount.
    pub const NONE: Self = Self(Decimal::ZERO);

    /// Create a discount from a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::DiscountOutOfRange`] unless `0 <= percent <= 100`.
    pub fn new(percent: Decimal) -> Result<Self, PriceError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(PriceError::DiscountOutOfRange(percent));
        }
        Ok(Self(percent))
    }

    /// The discount as a percentage (e.g. `10` for 10% off).
    #[must_use]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// The fraction of the price that remains to be paid, `1 - percent / 100`.
    #[must_use]
    pub fn remaining_fraction(&self) -> Decimal {
        Decimal::ONE - self.0 / Decimal::ONE_HUNDRED
    }

    /// Whether any discount applies.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        !self.0.is_zero()
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% OFF", self.0.normalize())
    }
}

impl Serialize for Discount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Discount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let percent = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(percent).map_err(serde::de::Error::custom)
    }
}
