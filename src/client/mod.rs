//! SendGrid API client.
//!
//! Provides the main client interface for interacting with the SendGrid v3 API.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::config::{SendGridConfig, SendGridConfigBuilder};
use crate::errors::{SendGridError, SendGridResult};
use crate::resilience::{ExponentialBackoff, RetryConfig, RetryPolicy};
use crate::services::{
    CustomFieldsService, ListsService, SegmentsService, ServiceContext, TemplatesService,
    WhitelabelService,
};
use crate::transport::{HttpTransport, ReqwestTransport, RetryingTransport};

/// The main SendGrid client.
///
/// Cheap to clone; every service shares the same transport and credentials.
///
/// # Example
///
/// ```rust,no_run
/// use sendgrid_client::{SendGridClient, TemplateGeneration};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SendGridClient::builder()
///         .api_key("SG.your_api_key")
///         .build()?;
///
///     let template = client
///         .templates()
///         .create("Welcome", TemplateGeneration::Dynamic)
///         .await?;
///     println!("created {}", template.id);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SendGridClient {
    config: Arc<SendGridConfig>,
    transport: Arc<RetryingTransport>,
    ctx: ServiceContext,
}

impl SendGridClient {
    /// Creates a new client builder.
    pub fn builder() -> SendGridClientBuilder {
        SendGridClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `SENDGRID_API_KEY` and optionally `SENDGRID_BASE_URL`,
    /// `SENDGRID_TIMEOUT`, `SENDGRID_MAX_RETRIES` and `SENDGRID_ON_BEHALF_OF`.
    pub fn from_env() -> SendGridResult<Self> {
        let config = SendGridConfig::from_env()?;
        SendGridClientBuilder::from_config(&config).build()
    }

    /// Creates a client from an API key.
    pub fn from_api_key(api_key: impl Into<String>) -> SendGridResult<Self> {
        SendGridClientBuilder::new().api_key(api_key).build()
    }

    /// Transactional templates and their versions.
    pub fn templates(&self) -> TemplatesService {
        TemplatesService::new(self.ctx.clone())
    }

    /// Contact lists and their recipients.
    pub fn lists(&self) -> ListsService {
        ListsService::new(self.ctx.clone())
    }

    /// Contact segments.
    pub fn segments(&self) -> SegmentsService {
        SegmentsService::new(self.ctx.clone())
    }

    /// Contact custom fields.
    pub fn custom_fields(&self) -> CustomFieldsService {
        CustomFieldsService::new(self.ctx.clone())
    }

    /// Sender authentication: domains, reverse DNS and branded links.
    pub fn whitelabel(&self) -> WhitelabelService {
        WhitelabelService::new(self.ctx.clone())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SendGridConfig {
        &self.config
    }

    /// Returns the retry policy every request goes through.
    pub fn retry_policy(&self) -> &Arc<dyn RetryPolicy> {
        self.transport.policy()
    }
}

impl std::fmt::Debug for SendGridClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridClient")
            .field("config", &self.config)
            .field("retry_policy", self.transport.policy())
            .finish()
    }
}

/// Builder for the SendGrid client.
pub struct SendGridClientBuilder {
    config_builder: SendGridConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
    retry_policy: Option<Arc<dyn RetryPolicy>>,
}

impl SendGridClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: SendGridConfigBuilder::new(),
            transport: None,
            auth: None,
            retry_policy: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: &SendGridConfig) -> Self {
        let mut config_builder = SendGridConfigBuilder::new()
            .api_key(config.api_key())
            .base_url(&config.base_url)
            .timeout(config.timeout)
            .max_retries(config.max_retries);
        if let Some(subuser) = &config.on_behalf_of {
            config_builder = config_builder.on_behalf_of(subuser);
        }
        for (name, value) in &config.custom_headers {
            config_builder = config_builder.header(name, value);
        }

        Self {
            config_builder,
            ..Self::new()
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the maximum retry attempts used by the default retry policy.
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config_builder = self.config_builder.max_retries(retries);
        self
    }

    /// Acts on behalf of a subuser.
    #[must_use]
    pub fn on_behalf_of(mut self, subuser: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.on_behalf_of(subuser);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Sets a custom transport. It is still wrapped with the retry policy.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    #[must_use]
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Replaces the default exponential backoff policy.
    #[must_use]
    pub fn retry_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Builds the client.
    pub fn build(self) -> SendGridResult<SendGridClient> {
        let config = self.config_builder.build()?;

        let inner: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                ReqwestTransport::new(&config.base_url, config.timeout).map_err(|e| {
                    SendGridError::Configuration {
                        message: e.to_string(),
                    }
                })?,
            ),
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => Arc::new(ApiKeyAuth::from_string(config.api_key())),
        };
        auth.validate()?;

        let policy: Arc<dyn RetryPolicy> = self.retry_policy.unwrap_or_else(|| {
            Arc::new(ExponentialBackoff::new(
                RetryConfig::default().max_retries(config.max_retries),
            ))
        });

        let transport = Arc::new(RetryingTransport::new(inner, policy));
        let ctx = ServiceContext::new(
            Arc::clone(&transport) as Arc<dyn HttpTransport>,
            auth,
            config.default_headers(),
        );

        Ok(SendGridClient {
            config: Arc::new(config),
            transport,
            ctx,
        })
    }
}

impl Default for SendGridClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
