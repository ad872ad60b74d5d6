//! # Request Handlers
//!
//! Axum request handlers for the payment API.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use checkout_core::{confirm_payment, CheckoutError, PaymentReceipt, PaymentSubmission};
use serde::Serialize;
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            kind: None,
            code: None,
            details: None,
        }
    }
}

impl From<&CheckoutError> for ErrorResponse {
    fn from(err: &CheckoutError) -> Self {
        match err {
            CheckoutError::Processor(processor) => {
                let message = if processor.message.is_empty() {
                    "Could not process payment".to_string()
                } else {
                    processor.message.clone()
                };
                Self {
                    kind: Some(processor.kind_or_default().to_string()),
                    code: Some(processor.code_or_default().to_string()),
                    details: processor.details.clone(),
                    ..Self::new(err.label(), message)
                }
            }
            other => Self::new(other.label(), other.to_string()),
        }
    }
}

/// Error returned from handlers, rendered as a JSON `ErrorResponse`
#[derive(Debug)]
pub struct ApiError(pub CheckoutError);

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(ErrorResponse::from(&self.0))).into_response();

        if matches!(self.0, CheckoutError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "card-checkout",
        "processor": state.processor.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create and confirm a payment.
///
/// Checks run in order and the first failure wins: origin, required
/// fields, amount. The method check happens in the router.
#[instrument(skip_all)]
pub async fn submit_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PaymentReceipt>, ApiError> {
    state.trusted_origin.verify(&headers)?;

    let request = PaymentSubmission::from_slice(&body)?.validate()?;

    let receipt = confirm_payment(
        state.processor.as_ref(),
        &request,
        &state.urls.success_url(),
    )
    .await
    .map_err(|e| {
        error!(
            kind = e.kind_or_default(),
            code = e.code_or_default(),
            "Payment failed: {}",
            e
        );
        CheckoutError::Processor(e)
    })?;

    info!(
        "Payment succeeded: id={}, amount={} {}",
        receipt.payment_id, receipt.amount, receipt.currency
    );

    Ok(Json(receipt))
}

/// Fallback for every method other than POST on the payment route
pub async fn method_not_allowed() -> ApiError {
    ApiError(CheckoutError::MethodNotAllowed)
}
