//! # Checkout Controller
//!
//! Form controller for the checkout page: tokenizes the card, submits the
//! payment, and reports where to navigate next.
//!
//! ```text
//!   Idle ──submit──▶ Submitting ──ok──▶ (navigate to success)
//!    ▲                   │
//!    └──── Error(msg) ◀──┘ tokenizer or endpoint failure
//! ```
//!
//! There is no cancellation. A second submission is blocked only while a
//! submission is in flight, the same way the form disables its button.

use crate::item::CheckoutItem;
use crate::payment::{CardDetails, PaymentRequest};
use crate::processor::{CardTokenizer, PaymentSubmitter};

/// Form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    /// Last submission failed; the form is usable again
    Error(String),
}

pub struct CheckoutController<T, S> {
    tokenizer: T,
    submitter: S,
    item: CheckoutItem,
    success_path: String,
    state: FormState,
}

impl<T, S> CheckoutController<T, S>
where
    T: CardTokenizer,
    S: PaymentSubmitter,
{
    pub fn new(tokenizer: T, submitter: S, item: CheckoutItem) -> Self {
        Self {
            tokenizer,
            submitter,
            item,
            success_path: "/success".to_string(),
            state: FormState::Idle,
        }
    }

    /// Builder: set where a successful payment navigates to
    pub fn with_success_path(mut self, path: impl Into<String>) -> Self {
        self.success_path = path.into();
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FormState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Submit button text
    pub fn submit_label(&self) -> String {
        if self.is_submitting() {
            "Processing...".to_string()
        } else {
            format!("Pay {}", self.item.price.display())
        }
    }

    /// Run one submission: tokenize, then submit.
    ///
    /// Returns the path to navigate to on success. On failure the form
    /// lands in `FormState::Error` and `None` is returned.
    pub async fn submit(&mut self, card: &CardDetails) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.state = FormState::Submitting;

        match self.run(card).await {
            Ok(()) => {
                self.state = FormState::Idle;
                Some(self.success_path.clone())
            }
            Err(message) => {
                self.state = FormState::Error(message);
                None
            }
        }
    }

    async fn run(&self, card: &CardDetails) -> Result<(), String> {
        let token = self
            .tokenizer
            .tokenize(card)
            .await
            .map_err(|e| e.to_string())?;

        let request = PaymentRequest::new(token, self.item.price.amount)
            .with_currency(self.item.price.currency.as_str());

        self.submitter
            .submit(&request)
            .await
            .map(|_receipt| ())
            .map_err(|e| e.to_string())
    }
}
