//! # Checkout Error Types
//!
//! Typed error handling for the card-checkout payment flow.
//! Server-side operations return `Result<T, CheckoutError>`; the browser-side
//! pieces (tokenizer, endpoint client, controller) use `ClientError`.

use thiserror::Error;

/// Error kind reported when the processor gives none
pub const DEFAULT_ERROR_KIND: &str = "api_error";

/// Error code reported when the processor gives none
pub const DEFAULT_ERROR_CODE: &str = "payment_failed";

/// Failure reported by (or while talking to) the payment processor.
///
/// `kind` and `code` come from the processor's own error taxonomy
/// (e.g. `card_error` / `insufficient_funds`) when it supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProcessorError {
    /// Processor error type (`card_error`, `invalid_request_error`, ...)
    pub kind: Option<String>,
    /// Processor error code (`card_declined`, `insufficient_funds`, ...)
    pub code: Option<String>,
    /// Human readable message
    pub message: String,
    /// Underlying diagnostic message from the processor, if any
    pub details: Option<String>,
}

impl ProcessorError {
    /// Create an error with only a message (generic kind/code)
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: None,
            code: None,
            message: message.into(),
            details: None,
        }
    }

    /// Builder: set the processor error type
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Builder: set the processor error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Builder: attach the processor's diagnostic message
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// A payment that came back without error but did not succeed
    pub fn unexpected_status(status: &str) -> Self {
        Self::new(format!("Payment failed with status: {}", status))
    }

    /// Error type, falling back to `api_error`
    pub fn kind_or_default(&self) -> &str {
        self.kind.as_deref().unwrap_or(DEFAULT_ERROR_KIND)
    }

    /// Error code, falling back to `payment_failed`
    pub fn code_or_default(&self) -> &str {
        self.code.as_deref().unwrap_or(DEFAULT_ERROR_CODE)
    }
}

/// Core error type for the payment endpoint
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Request used a method other than POST
    #[error("Only POST requests are accepted")]
    MethodNotAllowed,

    /// Request did not come from the trusted origin
    #[error("{0}")]
    Forbidden(String),

    /// Missing or invalid request fields
    #[error("{0}")]
    BadRequest(String),

    /// The processor rejected or failed the payment
    #[error(transparent)]
    Processor(#[from] ProcessorError),

    /// Configuration errors (missing keys, invalid URLs)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::MethodNotAllowed => 405,
            CheckoutError::Forbidden(_) => 403,
            CheckoutError::BadRequest(_) => 400,
            CheckoutError::Processor(_) => 500,
            CheckoutError::Configuration(_) => 500,
        }
    }

    /// Short label sent as the `error` field of the response body
    pub fn label(&self) -> &'static str {
        match self {
            CheckoutError::MethodNotAllowed => "Method Not Allowed",
            CheckoutError::Forbidden(_) => "Forbidden",
            CheckoutError::BadRequest(_) => "Bad Request",
            CheckoutError::Processor(_) => "Payment Failed",
            CheckoutError::Configuration(_) => "Internal Server Error",
        }
    }
}

/// Result type alias for endpoint operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Errors surfaced to the shopper by the checkout controller.
///
/// Every variant displays as the single message shown in the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The processor's client library could not tokenize the card
    #[error("{0}")]
    Tokenization(String),

    /// The payment endpoint answered with a non-2xx status
    #[error("{0}")]
    Rejected(String),

    /// The request never completed (network, bad response body)
    #[error("{0}")]
    Transport(String),
}
