//! # checkout-stripe
//!
//! Stripe integration for card-checkout-rs.
//!
//! This crate provides both halves of a card payment:
//!
//! 1. **StripeTokenizer** - PaymentMethods API, publishable key
//!    - Card input in, `pm_...` token out
//!    - Used by the checkout form
//!
//! 2. **StripePaymentIntents** - PaymentIntents API, secret key
//!    - Creates and confirms the payment in one call
//!    - Used by the payment endpoint
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::StripePaymentIntents;
//! use checkout_core::{confirm_payment, PaymentRequest};
//!
//! let processor = StripePaymentIntents::from_env()?;
//!
//! let receipt = confirm_payment(
//!     &processor,
//!     &PaymentRequest::new("pm_card_visa", 1000),
//!     "https://example.com/success",
//! ).await?;
//! ```

mod api;
pub mod config;
pub mod intents;
pub mod tokenizer;

// Re-exports
pub use config::StripeConfig;
pub use intents::StripePaymentIntents;
pub use tokenizer::StripeTokenizer;
