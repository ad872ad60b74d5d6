//! # Payment Endpoint Client
//!
//! `PaymentSubmitter` that posts to `/api/payment` over HTTP, the same call
//! the checkout page makes with `fetch`.

use async_trait::async_trait;
use checkout_core::{CheckoutUrls, ClientError, PaymentReceipt, PaymentRequest, PaymentSubmitter};
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;

pub struct EndpointClient {
    client: Client,
    endpoint_url: String,
    origin: String,
}

impl EndpointClient {
    /// Client for the server at `base_url`, sending that base URL as `Origin`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let urls = CheckoutUrls::new(base_url);
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint_url: urls.payment_endpoint_url(),
            origin: urls.base_url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl PaymentSubmitter for EndpointClient {
    async fn submit(&self, request: &PaymentRequest) -> Result<PaymentReceipt, ClientError> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .header(header::ORIGIN, &self.origin)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Payment failed".to_string());
            return Err(ClientError::Rejected(message));
        }

        response
            .json::<PaymentReceipt>()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))
    }
}
