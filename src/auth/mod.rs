//! Credentials for the `Authorization` header.
//!
//! SendGrid v3 accepts an API key as a Bearer token. Keys look like
//! `SG.<key id>.<secret>`; the key ID is not secret and is what SendGrid's
//! dashboard shows, so it is the preferred way to identify a key in logs.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::errors::{SendGridError, SendGridResult};

/// Supplies the `Authorization` header value for every request.
pub trait AuthProvider: Send + Sync + fmt::Debug {
    /// Full header value, scheme included.
    fn authorization(&self) -> SecretString;

    /// Checked once when the client is built.
    fn validate(&self) -> SendGridResult<()> {
        Ok(())
    }
}

/// A SendGrid API key sent as `Bearer <key>`.
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    /// Wraps an API key.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Wraps an API key given as plain text.
    pub fn from_string(api_key: impl Into<String>) -> Self {
        Self::new(SecretString::new(api_key.into()))
    }

    /// The public `<key id>` part of an `SG.<key id>.<secret>` key.
    pub fn key_id(&self) -> Option<&str> {
        let mut parts = self.api_key.expose_secret().splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("SG"), Some(id), Some(_)) if !id.is_empty() => Some(id),
            _ => None,
        }
    }

    /// Last four characters of the key.
    pub fn key_hint(&self) -> String {
        key_hint(self.api_key.expose_secret())
    }
}

/// Last four characters of a key, or `****` for short keys.
pub(crate) fn key_hint(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("...{tail}")
    } else {
        "****".to_string()
    }
}

impl AuthProvider for ApiKeyAuth {
    fn authorization(&self) -> SecretString {
        SecretString::new(format!("Bearer {}", self.api_key.expose_secret()))
    }

    // Format warnings belong to config; this only rejects keys that cannot
    // be sent as a header at all.
    fn validate(&self) -> SendGridResult<()> {
        let key = self.api_key.expose_secret();
        if key.trim().is_empty() {
            return Err(SendGridError::Configuration {
                message: "API key cannot be empty".to_string(),
            });
        }
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(SendGridError::Configuration {
                message: format!(
                    "API key {} contains whitespace or control characters",
                    self.key_hint()
                ),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ApiKeyAuth");
        match self.key_id() {
            Some(id) => debug.field("key_id", &id),
            None => debug.field("key_hint", &self.key_hint()),
        };
        debug.finish_non_exhaustive()
    }
}
