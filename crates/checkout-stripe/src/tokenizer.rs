//! # Stripe Card Tokenizer
//!
//! Turns raw card input into a PaymentMethod id (`pm_...`) by calling
//! `POST /v1/payment_methods` with the publishable key, exactly what
//! Stripe.js does in the browser. Errors are passed through unchanged.

use crate::api::{build_client, processor_error};
use crate::config::{api_base_url_from_env, publishable_key_from_env};
use async_trait::async_trait;
use checkout_core::{CardDetails, CardTokenizer, CheckoutResult, ClientError};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub struct StripeTokenizer {
    publishable_key: String,
    api_base_url: String,
    client: Client,
}

impl StripeTokenizer {
    pub fn new(publishable_key: impl Into<String>, api_base_url: impl Into<String>) -> CheckoutResult<Self> {
        Ok(Self {
            publishable_key: publishable_key.into(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            client: build_client()?,
        })
    }

    /// Create from `STRIPE_PUBLISHABLE_KEY` (and optional `STRIPE_API_BASE_URL`)
    pub fn from_env() -> CheckoutResult<Self> {
        Self::new(publishable_key_from_env()?, api_base_url_from_env())
    }
}

#[async_trait]
impl CardTokenizer for StripeTokenizer {
    async fn tokenize(&self, card: &CardDetails) -> Result<String, ClientError> {
        let url = format!("{}/v1/payment_methods", self.api_base_url);
        debug!("Tokenizing card ending {}", card.last4());

        let params = [
            ("type", "card".to_string()),
            ("card[number]", card.number.replace([' ', '-'], "")),
            ("card[exp_month]", card.exp_month.to_string()),
            ("card[exp_year]", card.exp_year.to_string()),
            ("card[cvc]", card.cvc.clone()),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.publishable_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Tokenization(processor_error(status, &body).message));
        }

        let method: PaymentMethodResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Transport(format!("Failed to parse Stripe response: {}", e)))?;
        Ok(method.id)
    }
}

#[derive(Debug, Deserialize)]
struct PaymentMethodResponse {
    id: String,
}
