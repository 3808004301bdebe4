//! Configuration module for the SendGrid client.
//!
//! Provides configuration management including the API key, base URL,
//! timeouts, retry settings and subuser impersonation.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::errors::{SendGridError, SendGridResult};

/// Default base URL for the SendGrid v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com/v3";

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum retry attempts.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Header SendGrid uses to act on behalf of a subuser.
pub const ON_BEHALF_OF_HEADER: &str = "on-behalf-of";

/// Configuration for the SendGrid client.
#[derive(Clone)]
pub struct SendGridConfig {
    /// API key for authentication (stored securely).
    pub(crate) api_key: SecretString,
    /// Base URL for API requests, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts.
    pub max_retries: u32,
    /// Subuser to impersonate via the `on-behalf-of` header.
    pub on_behalf_of: Option<String>,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl SendGridConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> SendGridConfigBuilder {
        SendGridConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SENDGRID_API_KEY` (required): API key for authentication
    /// - `SENDGRID_BASE_URL` (optional): Custom base URL
    /// - `SENDGRID_TIMEOUT` (optional): Request timeout in seconds
    /// - `SENDGRID_MAX_RETRIES` (optional): Maximum retry attempts
    /// - `SENDGRID_ON_BEHALF_OF` (optional): Subuser to impersonate
    pub fn from_env() -> SendGridResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from any variable source keyed like the
    /// environment.
    pub(crate) fn from_lookup<F>(lookup: F) -> SendGridResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("SENDGRID_API_KEY").ok_or_else(|| SendGridError::Configuration {
            message: "SENDGRID_API_KEY environment variable not set".to_string(),
        })?;

        let mut builder = SendGridConfigBuilder::new().api_key(api_key);

        if let Some(base_url) = lookup("SENDGRID_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Some(timeout) = lookup("SENDGRID_TIMEOUT") {
            let secs = parse_var::<u64>("SENDGRID_TIMEOUT", &timeout)?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(retries) = lookup("SENDGRID_MAX_RETRIES") {
            builder = builder.max_retries(parse_var::<u32>("SENDGRID_MAX_RETRIES", &retries)?);
        }

        if let Some(subuser) = lookup("SENDGRID_ON_BEHALF_OF").filter(|s| !s.trim().is_empty()) {
            builder = builder.on_behalf_of(subuser);
        }

        builder.build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        crate::auth::key_hint(self.api_key.expose_secret())
    }

    /// Returns the full URL for an endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Headers added to every request: impersonation plus custom headers.
    pub(crate) fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(self.custom_headers.len() + 1);
        if let Some(subuser) = &self.on_behalf_of {
            headers.push((ON_BEHALF_OF_HEADER.to_string(), subuser.clone()));
        }
        headers.extend(self.custom_headers.iter().cloned());
        headers
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> SendGridResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| SendGridError::Configuration {
            message: format!("{name} has an invalid value: {value:?}"),
        })
}

impl std::fmt::Debug for SendGridConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("on_behalf_of", &self.on_behalf_of)
            .finish_non_exhaustive()
    }
}

/// Builder for `SendGridConfig`.
#[derive(Default)]
pub struct SendGridConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    on_behalf_of: Option<String>,
    custom_headers: Vec<(String, String)>,
}

impl SendGridConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum retry attempts.
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Acts on behalf of a subuser.
    #[must_use]
    pub fn on_behalf_of(mut self, subuser: impl Into<String>) -> Self {
        self.on_behalf_of = Some(subuser.into());
        self
    }

    /// Adds a custom header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SendGridResult<SendGridConfig> {
        let api_key = self.api_key.ok_or_else(|| SendGridError::Configuration {
            message: "API key is required".to_string(),
        })?;

        if api_key.trim().is_empty() {
            return Err(SendGridError::Configuration {
                message: "API key cannot be empty".to_string(),
            });
        }

        if !api_key.starts_with("SG.") {
            tracing::warn!(
                key_hint = %crate::auth::key_hint(&api_key),
                "API key does not match expected SendGrid format (SG.*)"
            );
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let parsed = Url::parse(&base_url)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SendGridError::Configuration {
                message: "Base URL must start with http:// or https://".to_string(),
            });
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(SendGridError::Configuration {
                message: "Timeout must be greater than zero".to_string(),
            });
        }

        Ok(SendGridConfig {
            api_key: SecretString::new(api_key),
            base_url,
            timeout,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            on_behalf_of: self.on_behalf_of,
            custom_headers: self.custom_headers,
        })
    }
}
