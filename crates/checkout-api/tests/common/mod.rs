//! Shared fixtures for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use checkout_api::{create_router, AppConfig, AppState};
use checkout_core::{
    CheckoutItem, PaymentProcessor, PaymentRequest, PaymentStatus, ProcessorError,
    ProcessorPayment,
};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://localhost:3000";

/// Processor returning a canned outcome and recording every call
pub struct FakeProcessor {
    outcome: Result<ProcessorPayment, ProcessorError>,
    calls: Mutex<Vec<(PaymentRequest, String)>>,
}

impl FakeProcessor {
    pub fn returning(outcome: Result<ProcessorPayment, ProcessorError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::returning(Ok(payment("succeeded")))
    }

    pub fn calls(&self) -> Vec<(PaymentRequest, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProcessor for FakeProcessor {
    async fn create_and_confirm(
        &self,
        request: &PaymentRequest,
        return_url: &str,
    ) -> Result<ProcessorPayment, ProcessorError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.clone(), return_url.to_string()));
        self.outcome.clone()
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

pub fn payment(status: &str) -> ProcessorPayment {
    ProcessorPayment {
        id: "pi_123".to_string(),
        status: PaymentStatus::from(status),
        amount: 1000,
        currency: "usd".to_string(),
    }
}

pub fn server(processor: Arc<FakeProcessor>) -> TestServer {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 3000,
        base_url: BASE_URL.to_string(),
        environment: "test".to_string(),
    };
    let state = AppState::new(processor, config, CheckoutItem::default(), "pk_test_123").unwrap();

    TestServer::new(create_router(state)).unwrap()
}
