//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the injected payment processor, configuration and the item on sale.

use crate::origin::TrustedOrigin;
use anyhow::Context;
use checkout_core::{BoxedPaymentProcessor, CheckoutItem, CheckoutUrls};
use checkout_stripe::StripePaymentIntents;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public base URL; also defines the trusted origin
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables. `BASE_URL` is required.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("BASE_URL").context("BASE_URL not set")?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment processor, constructed once at startup
    pub processor: BoxedPaymentProcessor,
    /// Page and return URLs
    pub urls: CheckoutUrls,
    /// Only origin allowed to submit payments
    pub trusted_origin: TrustedOrigin,
    /// Item on sale
    pub item: CheckoutItem,
    /// Stripe publishable key, rendered into the checkout page
    pub publishable_key: String,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build state around an explicitly constructed processor
    pub fn new(
        processor: BoxedPaymentProcessor,
        config: AppConfig,
        item: CheckoutItem,
        publishable_key: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let trusted_origin = TrustedOrigin::from_base_url(&config.base_url)?;

        Ok(Self {
            processor,
            urls: CheckoutUrls::new(&config.base_url),
            trusted_origin,
            item,
            publishable_key: publishable_key.into(),
            config,
        })
    }

    /// Create state with the Stripe processor, from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let item = load_checkout_item()?;

        let stripe = StripePaymentIntents::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        let stripe = with_item_metadata(stripe, &item);
        let publishable_key = stripe.config().publishable_key.clone();
        tracing::info!(
            "Stripe mode: {}",
            if stripe.config().is_live_mode() { "live" } else { "test" }
        );

        Self::new(Arc::new(stripe), config, item, publishable_key)
    }
}

/// Tag every PaymentIntent with the item's `[item.metadata]` entries
fn with_item_metadata(stripe: StripePaymentIntents, item: &CheckoutItem) -> StripePaymentIntents {
    item.metadata
        .iter()
        .fold(stripe, |stripe, (key, value)| stripe.with_metadata(key, value))
}

/// Load the item on sale from config file, falling back to the default item
fn load_checkout_item() -> anyhow::Result<CheckoutItem> {
    let config_paths = [
        "config/checkout.toml",
        "../config/checkout.toml",
        "../../config/checkout.toml",
    ];

    match CheckoutItem::load_from_paths(&config_paths[..]).map_err(anyhow::Error::msg)? {
        Some(item) => {
            tracing::info!("Loaded checkout item {:?} ({})", item.name, item.price.display());
            Ok(item)
        }
        None => {
            tracing::warn!("No checkout item config found, using default item");
            Ok(CheckoutItem::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use checkout_core::{PaymentProcessor, PaymentRequest, ProcessorError, ProcessorPayment};
    use checkout_stripe::StripeConfig;

    struct NoopProcessor;

    #[async_trait]
    impl PaymentProcessor for NoopProcessor {
        async fn create_and_confirm(
            &self,
            _request: &PaymentRequest,
            _return_url: &str,
        ) -> Result<ProcessorPayment, ProcessorError> {
            Err(ProcessorError::new("not wired"))
        }

        fn provider_name(&self) -> &'static str {
            "noop"
        }
    }

    fn config(base_url: &str) -> AppConfig {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: base_url.to_string(),
            environment: "test".to_string(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config("http://localhost:3000").socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_state_derives_urls_and_origin() {
        let state = AppState::new(
            Arc::new(NoopProcessor),
            config("https://shop.example.com/"),
            CheckoutItem::default(),
            "pk_test_1",
        )
        .unwrap();

        assert_eq!(state.urls.success_url(), "https://shop.example.com/success");
        assert_eq!(state.trusted_origin.as_str(), "https://shop.example.com");
        assert_eq!(state.processor.provider_name(), "noop");
    }

    #[test]
    fn test_shipped_item_config() {
        let item =
            CheckoutItem::from_toml_str(include_str!("../../../config/checkout.toml")).unwrap();

        assert_eq!(item.price.amount, 1000);
        assert_eq!(item.metadata.get("workshop").map(String::as_str), Some("WDC_Payment"));
    }

    #[test]
    fn test_item_metadata_reaches_processor() {
        let stripe = StripePaymentIntents::new(StripeConfig::new("sk_test_1", "pk_test_1")).unwrap();
        let item = CheckoutItem::default().with_metadata("workshop", "WDC_Payment");

        let metadata = with_item_metadata(stripe, &item).metadata().to_vec();
        assert_eq!(
            metadata,
            vec![
                ("integration_check".to_string(), "accept_a_payment".to_string()),
                ("workshop".to_string(), "WDC_Payment".to_string()),
            ]
        );
    }

    #[test]
    fn test_state_rejects_relative_base_url() {
        let result = AppState::new(
            Arc::new(NoopProcessor),
            config("shop.example.com"),
            CheckoutItem::default(),
            "pk_test_1",
        );
        assert!(result.is_err());
    }
}
