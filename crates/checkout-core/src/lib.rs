//! # checkout-core
//!
//! Core types and traits for the card-checkout payment flow.
//!
//! This crate provides:
//! - `PaymentSubmission` validation into a `PaymentRequest`
//! - `PaymentProcessor`, `CardTokenizer` and `PaymentSubmitter` seams
//! - `confirm_payment`, which only accepts a `succeeded` payment
//! - `CheckoutController`, the checkout form state machine
//! - `CheckoutItem` and `Price` for the single item on sale
//! - `CheckoutError` / `ClientError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{confirm_payment, PaymentSubmission};
//!
//! let request = PaymentSubmission::from_slice(body)?.validate()?;
//! let receipt = confirm_payment(processor.as_ref(), &request, &urls.success_url()).await?;
//! ```

pub mod controller;
pub mod error;
pub mod item;
pub mod payment;
pub mod processor;

// Re-exports for convenience
pub use controller::{CheckoutController, FormState};
pub use error::{
    CheckoutError, CheckoutResult, ClientError, ProcessorError, DEFAULT_ERROR_CODE,
    DEFAULT_ERROR_KIND,
};
pub use item::{CheckoutItem, Currency, Price};
pub use payment::{
    CardDetails, PaymentReceipt, PaymentRequest, PaymentStatus, PaymentSubmission,
    ProcessorPayment, DEFAULT_CURRENCY,
};
pub use processor::{
    confirm_payment, BoxedPaymentProcessor, CardTokenizer, CheckoutUrls, PaymentProcessor,
    PaymentSubmitter,
};
