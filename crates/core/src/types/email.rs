//! Contact email collected at checkout.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a checkout email was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email address is required")]
    Empty,
    #[error("email address is longer than {max} characters")]
    TooLong { max: usize },
    #[error("email address contains spaces")]
    Whitespace,
    #[error("email address needs a single '@'")]
    AtSymbol,
    #[error("email address has nothing before the '@'")]
    EmptyLocalPart,
    /// No dot with text on both sides after the `@`.
    #[error("email domain is incomplete")]
    InvalidDomain,
}

/// Customer email attached to an order.
///
/// Accepts `local@domain` where neither side contains whitespace or a second
/// `@`, and the domain has a dot with text on either side of it.
///
/// ```
/// use craft_culture_core::Email;
///
/// assert!(Email::parse("asha@crafts.co.in").is_ok());
/// assert!(Email::parse("asha@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

/// RFC 5321 path limit.
const MAX_LEN: usize = 254;

fn domain_is_complete(domain: &str) -> bool {
    let mut inner = domain.chars();
    inner.next();
    inner.next_back();
    inner.as_str().contains('.')
}

impl Email {
    /// Checks `input` against the form's email rules.
    ///
    /// # Errors
    ///
    /// The first [`EmailError`] the input runs into, in declaration order.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        match input.len() {
            0 => return Err(EmailError::Empty),
            n if n > MAX_LEN => return Err(EmailError::TooLong { max: MAX_LEN }),
            _ => {}
        }
        if input.contains(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let mut parts = input.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(EmailError::AtSymbol);
        };
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if !domain_is_complete(domain) {
            return Err(EmailError::InvalidDomain);
        }
        Ok(Self(input.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).map(|_| Self(value))
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}
