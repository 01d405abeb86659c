//! Opaque backend identifiers.
//!
//! The backend hands out string `_id`s for products and orders. Each gets its
//! own newtype so a product id can't be passed where an order id is expected.

/// Declares a `String`-backed identifier that serializes as a bare string.
///
/// ```rust
/// # use craft_culture_core::define_id;
/// define_id!(WishlistId);
/// define_id!(ReviewId);
///
/// let wishlist = WishlistId::new("64f1c2");
/// assert_eq!(wishlist.as_str(), "64f1c2");
/// // `let _: ReviewId = wishlist;` is a type error.
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
