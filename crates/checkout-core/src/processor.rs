//! # Processor Seams
//!
//! Traits separating the checkout flow from the payment processor:
//!
//! ```text
//!  browser side                           server side
//!  ┌───────────────┐  ┌────────────────┐  ┌──────────────────┐
//!  │ CardTokenizer │─▶│PaymentSubmitter│─▶│ PaymentProcessor │
//!  │  card → pm_   │  │ POST endpoint  │  │ create + confirm │
//!  └───────────────┘  └────────────────┘  └──────────────────┘
//! ```
//!
//! The endpoint is handed an explicitly constructed processor at startup,
//! so tests can swap in a fake.

use crate::error::{ClientError, ProcessorError};
use crate::payment::{CardDetails, PaymentReceipt, PaymentRequest, ProcessorPayment};
use async_trait::async_trait;
use std::sync::Arc;

/// Server-side processor client: creates a payment and confirms it in one call.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create and immediately confirm a payment.
    ///
    /// # Arguments
    /// * `request` - Validated payment request
    /// * `return_url` - Where the processor sends the shopper after any
    ///   out-of-band authentication (3-D Secure)
    ///
    /// # Returns
    /// The processor's view of the payment, whatever its status.
    async fn create_and_confirm(
        &self,
        request: &PaymentRequest,
        return_url: &str,
    ) -> Result<ProcessorPayment, ProcessorError>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared processor (dynamic dispatch)
pub type BoxedPaymentProcessor = Arc<dyn PaymentProcessor>;

/// Turns raw card input into an opaque payment method token.
#[async_trait]
pub trait CardTokenizer: Send + Sync {
    async fn tokenize(&self, card: &CardDetails) -> Result<String, ClientError>;
}

/// Sends a payment request to the payment endpoint.
#[async_trait]
pub trait PaymentSubmitter: Send + Sync {
    async fn submit(&self, request: &PaymentRequest) -> Result<PaymentReceipt, ClientError>;
}

/// Create and confirm a payment, treating any status other than
/// `succeeded` as a failure.
///
/// The receipt carries the amount and currency echoed by the processor,
/// not the ones that were requested.
pub async fn confirm_payment(
    processor: &dyn PaymentProcessor,
    request: &PaymentRequest,
    return_url: &str,
) -> Result<PaymentReceipt, ProcessorError> {
    let payment = processor.create_and_confirm(request, return_url).await?;

    if !payment.status.is_succeeded() {
        return Err(ProcessorError::unexpected_status(payment.status.as_str()));
    }

    Ok(PaymentReceipt {
        success: true,
        payment_id: payment.id,
        amount: payment.amount,
        currency: payment.currency,
    })
}

/// URLs of the checkout pages, relative to the site's base URL
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Base URL of the application (e.g., "https://shop.example.com")
    pub base_url: String,
    /// Landing page path
    pub home_path: String,
    /// Card form page path
    pub checkout_path: String,
    /// Success page path
    pub success_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            home_path: "/".to_string(),
            checkout_path: "/checkout".to_string(),
            success_path: "/success".to_string(),
        }
    }

    /// Return URL handed to the processor
    pub fn success_url(&self) -> String {
        format!("{}{}", self.base_url, self.success_path)
    }

    pub fn checkout_url(&self) -> String {
        format!("{}{}", self.base_url, self.checkout_path)
    }

    /// Full URL of the payment endpoint
    pub fn payment_endpoint_url(&self) -> String {
        format!("{}/api/payment", self.base_url)
    }
}
