//! # Stripe PaymentIntents
//!
//! Creates and confirms a PaymentIntent in a single call
//! (`POST /v1/payment_intents` with `confirm=true`).

use crate::api::{build_client, processor_error, PROVIDER};
use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutResult, PaymentProcessor, PaymentRequest, PaymentStatus, ProcessorError,
    ProcessorPayment,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Stripe PaymentIntents processor
pub struct StripePaymentIntents {
    config: StripeConfig,
    client: Client,
    metadata: Vec<(String, String)>,
}

impl StripePaymentIntents {
    /// Create a new processor from explicit configuration
    pub fn new(config: StripeConfig) -> CheckoutResult<Self> {
        Ok(Self {
            config,
            client: build_client()?,
            metadata: vec![(
                "integration_check".to_string(),
                "accept_a_payment".to_string(),
            )],
        })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        Self::new(StripeConfig::from_env()?)
    }

    /// Builder: attach extra metadata to every PaymentIntent
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Metadata sent with every PaymentIntent
    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    fn form_params(&self, request: &PaymentRequest, return_url: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("amount".to_string(), request.amount.to_string()),
            ("currency".to_string(), request.currency.clone()),
            ("payment_method".to_string(), request.payment_method_id.clone()),
            ("confirm".to_string(), "true".to_string()),
            ("return_url".to_string(), return_url.to_string()),
        ];
        for (key, value) in &self.metadata {
            params.push((format!("metadata[{}]", key), value.clone()));
        }
        params
    }
}

#[async_trait]
impl PaymentProcessor for StripePaymentIntents {
    #[instrument(skip(self, request), fields(amount = request.amount, currency = %request.currency))]
    async fn create_and_confirm(
        &self,
        request: &PaymentRequest,
        return_url: &str,
    ) -> Result<ProcessorPayment, ProcessorError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        debug!("Creating Stripe PaymentIntent");

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&self.form_params(request, return_url))
            .send()
            .await
            .map_err(|e| ProcessorError::new(format!("Could not reach Stripe: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProcessorError::new(format!("Could not read Stripe response: {}", e)))?;

        if !status.is_success() {
            return Err(processor_error(status, &body));
        }

        let intent: PaymentIntentResponse = serde_json::from_str(&body).map_err(|e| {
            ProcessorError::new(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Stripe PaymentIntent {}: status={}",
            intent.id, intent.status
        );

        Ok(ProcessorPayment {
            status: PaymentStatus::from(intent.status.as_str()),
            id: intent.id,
            amount: intent.amount,
            currency: intent.currency,
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    id: String,
    status: String,
    amount: i64,
    currency: String,
}
