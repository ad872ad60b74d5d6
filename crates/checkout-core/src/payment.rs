//! # Payment Types
//!
//! Transient value objects exchanged between the checkout page, the payment
//! endpoint and the processor. None of them are persisted.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Currency used when a submission does not name one
pub const DEFAULT_CURRENCY: &str = "usd";

/// Raw payment submission, as posted by the checkout page.
///
/// Fields are kept as loose JSON values so that `validate` decides which
/// error the caller sees, rather than the deserializer.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PaymentSubmission {
    #[serde(rename = "paymentMethodId", default)]
    pub payment_method_id: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub currency: Option<Value>,
}

impl PaymentSubmission {
    /// Parse a request body. An empty body is treated as `{}`.
    pub fn from_slice(body: &[u8]) -> CheckoutResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let not_an_object =
            || CheckoutError::BadRequest("Request body must be a JSON object".to_string());

        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).map_err(|_| not_an_object()),
            _ => Err(not_an_object()),
        }
    }

    /// Validate the submission, first violation wins:
    /// required fields, then amount, then currency.
    pub fn validate(self) -> CheckoutResult<PaymentRequest> {
        let payment_method_id = match self.payment_method_id {
            Some(Value::String(id)) if !id.trim().is_empty() => Some(id),
            _ => None,
        };
        let amount = self.amount.filter(|v| !v.is_null());

        let (payment_method_id, amount) = match (payment_method_id, amount) {
            (Some(id), Some(amount)) => (id, amount),
            _ => {
                return Err(CheckoutError::BadRequest(
                    "Missing required fields: paymentMethodId, amount".to_string(),
                ))
            }
        };

        let amount = positive_minor_units(&amount).ok_or_else(|| {
            CheckoutError::BadRequest("Amount must be a positive number".to_string())
        })?;

        let currency = match self.currency {
            None | Some(Value::Null) => DEFAULT_CURRENCY.to_string(),
            Some(Value::String(code)) if is_currency_code(&code) => code.to_ascii_lowercase(),
            Some(_) => {
                return Err(CheckoutError::BadRequest(
                    "Currency must be a three-letter ISO 4217 code".to_string(),
                ))
            }
        };

        Ok(PaymentRequest {
            payment_method_id,
            amount,
            currency,
        })
    }
}

fn positive_minor_units(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(amount) = number.as_i64() {
        return (amount > 0).then_some(amount);
    }
    // 1000.0 is still a whole number of minor units
    let amount = number.as_f64()?;
    (amount > 0.0 && amount.fract() == 0.0 && amount < i64::MAX as f64).then_some(amount as i64)
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// A validated payment request, ready for the processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Opaque, processor-issued payment method token (`pm_...`)
    pub payment_method_id: String,
    /// Amount in minor units, always > 0
    pub amount: i64,
    /// Lowercase ISO 4217 code
    pub currency: String,
}

impl PaymentRequest {
    pub fn new(payment_method_id: impl Into<String>, amount: i64) -> Self {
        Self {
            payment_method_id: payment_method_id.into(),
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Builder: set currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// Successful payment, as returned to the checkout page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub success: bool,
    /// Processor-assigned payment id (`pi_...`)
    pub payment_id: String,
    /// Amount as echoed by the processor
    pub amount: i64,
    /// Currency as echoed by the processor
    pub currency: String,
}

/// Terminal and intermediate payment statuses reported by the processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Succeeded,
    Processing,
    RequiresAction,
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresCapture,
    Canceled,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Processing => "processing",
            PaymentStatus::RequiresAction => "requires_action",
            PaymentStatus::RequiresPaymentMethod => "requires_payment_method",
            PaymentStatus::RequiresConfirmation => "requires_confirmation",
            PaymentStatus::RequiresCapture => "requires_capture",
            PaymentStatus::Canceled => "canceled",
            PaymentStatus::Other(status) => status,
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded)
    }
}

impl From<&str> for PaymentStatus {
    fn from(status: &str) -> Self {
        match status {
            "succeeded" => PaymentStatus::Succeeded,
            "processing" => PaymentStatus::Processing,
            "requires_action" => PaymentStatus::RequiresAction,
            "requires_payment_method" => PaymentStatus::RequiresPaymentMethod,
            "requires_confirmation" => PaymentStatus::RequiresConfirmation,
            "requires_capture" => PaymentStatus::RequiresCapture,
            "canceled" => PaymentStatus::Canceled,
            other => PaymentStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The processor's view of a created payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorPayment {
    pub id: String,
    pub status: PaymentStatus,
    pub amount: i64,
    pub currency: String,
}

/// Raw card input collected by the checkout form.
///
/// Only ever handed to the tokenizer; never sent to our own endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub cvc: String,
}

impl CardDetails {
    pub fn new(number: impl Into<String>, exp_month: u8, exp_year: u16, cvc: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            exp_month,
            exp_year,
            cvc: cvc.into(),
        }
    }

    /// Last four digits of the card number
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &format!("**** {}", self.last4()))
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvc", &"***")
            .finish()
    }
}
