//! Cart repository: the only code that reads or writes the `"cart"` key.
//!
//! The repository always moves the *whole* store. A write for one user also
//! rewrites every other user's cart exactly as this handle last read it, so
//! two handles doing read-modify-write at the same time can overwrite each
//! other (last write wins for the entire store).

use craft_culture_core::{CartStore, CorruptedStore, LineItem, Username};
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::storage::{LocalStorage, StorageError, keys};

/// Repository for the persisted cart store.
#[derive(Debug, Clone)]
pub struct CartRepository<S> {
    storage: S,
}

impl<S: LocalStorage> CartRepository<S> {
    /// Create a new cart repository over `storage`.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage handle.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the store, treating an absent, unreadable or malformed value as
    /// empty. Never fails.
    pub fn load(&self) -> CartStore {
        match self.try_load() {
            Ok(store) => store,
            Err(LoadError::Storage(e)) => {
                warn!(error = %e, "Cart storage unreadable, using empty cart store");
                CartStore::new()
            }
            Err(LoadError::Corrupted(e)) => {
                warn!(error = %e, "Cart store corrupted, using empty cart store");
                CartStore::new()
            }
        }
    }

    /// Load the store, reporting a storage failure or a corrupted top-level
    /// value instead of hiding it. Malformed entries inside a valid store are
    /// still dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if storage cannot be read or the value is not a
    /// cart store.
    pub fn try_load(&self) -> Result<CartStore, LoadError> {
        let Some(raw) = self.storage.get_item(keys::CART)? else {
            debug!("No cart store persisted yet");
            return Ok(CartStore::new());
        };

        let decoded = CartStore::decode(&raw)?;
        if decoded.was_repaired() {
            warn!(
                skipped_users = decoded.skipped_users,
                skipped_items = decoded.skipped_items,
                merged_items = decoded.merged_items,
                "Repaired malformed cart entries"
            );
        }
        Ok(decoded.store)
    }

    /// Persist the whole store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be written.
    pub fn save(&self, store: &CartStore) -> Result<(), StorageError> {
        let raw = store.encode()?;
        self.storage.set_item(keys::CART, &raw)?;
        debug!(users = store.len(), "Saved cart store");
        Ok(())
    }

    /// A user's line items from `store`; empty if the user has no cart.
    #[must_use]
    pub fn user_cart<'a>(store: &'a CartStore, username: &Username) -> &'a [LineItem] {
        store.user_cart(username)
    }

    /// The signed-in user, as written to storage by the login flow.
    ///
    /// An unreadable storage, a missing key, or a blank value all mean nobody
    /// is signed in.
    pub fn active_user(&self) -> Option<Username> {
        let raw = match self.storage.get_item(keys::USERNAME) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Could not read signed-in username");
                return None;
            }
        };
        Username::parse(&raw).ok()
    }

    /// The API bearer token written by the login flow, if any.
    pub fn auth_token(&self) -> Option<SecretString> {
        match self.storage.get_item(keys::TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(SecretString::from),
            Err(e) => {
                warn!(error = %e, "Could not read auth token");
                None
            }
        }
    }
}

/// Errors surfaced by [`CartRepository::try_load`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Corrupted(#[from] CorruptedStore),
}
