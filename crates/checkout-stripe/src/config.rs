//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! All secrets are loaded from environment variables.

use checkout_core::CheckoutError;
use std::env;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Publishable key (pk_test_... or pk_live_...), handed to the browser
    pub publishable_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    ///
    /// Optional:
    /// - `STRIPE_API_BASE_URL`
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY").map_err(|_| {
            CheckoutError::Configuration("STRIPE_SECRET_KEY not set".to_string())
        })?;

        let publishable_key = publishable_key_from_env()?;

        validate_secret_key(&secret_key)?;

        let mut config = Self::new(secret_key, publishable_key);
        if let Ok(url) = env::var("STRIPE_API_BASE_URL") {
            config = config.with_api_base_url(url);
        }
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key: publishable_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

// Keys never show up in logs
impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("mode", &if self.is_live_mode() { "live" } else { "test" })
            .field("publishable_key", &self.publishable_key)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Read and validate `STRIPE_PUBLISHABLE_KEY`.
///
/// The tokenizer only needs this key, so it is loadable on its own.
pub fn publishable_key_from_env() -> Result<String, CheckoutError> {
    dotenvy::dotenv().ok();

    let key = env::var("STRIPE_PUBLISHABLE_KEY").map_err(|_| {
        CheckoutError::Configuration("STRIPE_PUBLISHABLE_KEY not set".to_string())
    })?;
    validate_publishable_key(&key)?;
    Ok(key)
}

/// Optional `STRIPE_API_BASE_URL` override
pub fn api_base_url_from_env() -> String {
    env::var("STRIPE_API_BASE_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

fn validate_secret_key(key: &str) -> Result<(), CheckoutError> {
    if !key.starts_with("sk_test_") && !key.starts_with("sk_live_") {
        return Err(CheckoutError::Configuration(
            "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
        ));
    }
    Ok(())
}

fn validate_publishable_key(key: &str) -> Result<(), CheckoutError> {
    if !key.starts_with("pk_test_") && !key.starts_with("pk_live_") {
        return Err(CheckoutError::Configuration(
            "STRIPE_PUBLISHABLE_KEY must start with pk_test_ or pk_live_".to_string(),
        ));
    }
    Ok(())
}
