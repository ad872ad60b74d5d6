//! Stripe API plumbing shared by the processor and the tokenizer.

use checkout_core::{CheckoutError, ProcessorError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub(crate) const PROVIDER: &str = "stripe";

/// Build the HTTP client used for Stripe calls
pub(crate) fn build_client() -> Result<Client, CheckoutError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StripeErrorResponse {
    pub error: StripeError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StripeError {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Map a non-2xx Stripe response body onto a `ProcessorError`.
///
/// Bodies that are not Stripe error objects keep the generic kind/code.
pub(crate) fn processor_error(status: StatusCode, body: &str) -> ProcessorError {
    match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(StripeErrorResponse { error }) => {
            let message = error
                .message
                .unwrap_or_else(|| format!("Stripe returned HTTP {}", status.as_u16()));
            let mut err = ProcessorError::new(message.clone()).with_details(message);
            err.kind = error.kind;
            err.code = error.code;
            err
        }
        Err(_) => ProcessorError::new(format!("HTTP {}: {}", status.as_u16(), body)),
    }
}
