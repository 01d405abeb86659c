//! Sign-in state commands.
//!
//! Stands in for the web client's login flow: it writes the `username` and
//! `token` keys the cart reads.
//!
//! # Usage
//!
//! ```bash
//! craft-cli login alice --token eyJhbGciOi...
//! craft-cli logout
//! ```

use craft_culture_cart::storage::keys;
use craft_culture_cart::{LocalStorage, StorageError};
use craft_culture_core::Username;
use thiserror::Error;

/// Errors that can occur during session commands.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The username is blank.
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] craft_culture_core::UsernameError),

    /// Storage could not be written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Sign `username` in, replacing any previous session.
///
/// # Errors
///
/// Returns error if the username is blank or storage cannot be written.
pub fn login(
    storage: &impl LocalStorage,
    username: &str,
    token: Option<&str>,
) -> Result<(), SessionError> {
    let username = Username::parse(username)?;

    storage.set_item(keys::USERNAME, username.as_str())?;
    match token {
        Some(token) => storage.set_item(keys::TOKEN, token)?,
        None => storage.remove_item(keys::TOKEN)?,
    }
    storage.remove_item(keys::USER_ROLE)?;
    storage.remove_item(keys::EMAIL)?;

    tracing::info!("Signed in as {}", username);
    Ok(())
}

/// Sign out. Carts stay in storage for the next sign-in.
///
/// # Errors
///
/// Returns error if storage cannot be written.
pub fn logout(storage: &impl LocalStorage) -> Result<(), SessionError> {
    for key in [keys::USERNAME, keys::TOKEN, keys::USER_ROLE, keys::EMAIL] {
        storage.remove_item(key)?;
    }
    tracing::info!("Signed out");
    Ok(())
}
