mod common;

use axum::http::{header, HeaderValue, Method, StatusCode};
use checkout_core::ProcessorError;
use common::{payment, server, FakeProcessor, BASE_URL};
use serde_json::{json, Value};

fn trusted_origin() -> HeaderValue {
    HeaderValue::from_static(BASE_URL)
}

fn valid_body() -> Value {
    json!({"paymentMethodId": "pm_card_visa", "amount": 1000, "currency": "usd"})
}

#[tokio::test]
async fn non_post_methods_are_rejected_with_allow_header() {
    let processor = FakeProcessor::succeeding();
    let server = server(processor.clone());

    for method in [
        Method::GET,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
        Method::HEAD,
    ] {
        let response = server
            .method(method.clone(), "/api/payment")
            .add_header(header::ORIGIN, trusted_origin())
            .await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.header(header::ALLOW), "POST", "{}", method);
        if method == Method::HEAD {
            continue;
        }
        let body: Value = response.json();
        assert_eq!(body["error"], "Method Not Allowed");
        assert_eq!(body["message"], "Only POST requests are accepted");
    }
    assert!(processor.calls().is_empty());
}

#[tokio::test]
async fn preflight_request_is_not_answered() {
    let server = server(FakeProcessor::succeeding());

    let response = server
        .method(Method::OPTIONS, "/api/payment")
        .add_header(header::ORIGIN, trusted_origin())
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn method_is_checked_before_origin() {
    let server = server(FakeProcessor::succeeding());

    let response = server.get("/api/payment").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn untrusted_origin_is_forbidden() {
    let processor = FakeProcessor::succeeding();
    let server = server(processor.clone());

    for origin in [
        "https://evil.test",
        "http://localhost:3000.evil.test",
        "http://localhost:4000",
    ] {
        let response = server
            .post("/api/payment")
            .add_header(header::ORIGIN, HeaderValue::from_static(origin))
            .json(&valid_body())
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        let body: Value = response.json();
        assert_eq!(body, json!({"error": "Forbidden", "message": "Invalid request origin"}));
    }

    let response = server.post("/api/payment").json(&valid_body()).await;
    response.assert_status(StatusCode::FORBIDDEN);

    assert!(processor.calls().is_empty());
}

#[tokio::test]
async fn referer_on_trusted_origin_is_accepted() {
    let server = server(FakeProcessor::succeeding());

    let response = server
        .post("/api/payment")
        .add_header(
            header::REFERER,
            HeaderValue::from_static("http://localhost:3000/checkout"),
        )
        .json(&valid_body())
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn origin_is_checked_before_body() {
    let server = server(FakeProcessor::succeeding());

    let response = server
        .post("/api/payment")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://evil.test"))
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_fields_are_bad_requests_without_processor_call() {
    let processor = FakeProcessor::succeeding();
    let server = server(processor.clone());

    for body in [
        json!({}),
        json!({"amount": 1000}),
        json!({"paymentMethodId": "pm_card_visa"}),
        json!({"paymentMethodId": "", "amount": 1000}),
    ] {
        let response = server
            .post("/api/payment")
            .add_header(header::ORIGIN, trusted_origin())
            .json(&body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "Missing required fields: paymentMethodId, amount");
    }

    assert!(processor.calls().is_empty());
}

#[tokio::test]
async fn invalid_amounts_are_bad_requests() {
    let processor = FakeProcessor::succeeding();
    let server = server(processor.clone());

    for amount in [json!("1000"), json!(-1), json!(0), json!(12.5)] {
        let response = server
            .post("/api/payment")
            .add_header(header::ORIGIN, trusted_origin())
            .json(&json!({"paymentMethodId": "pm_card_visa", "amount": amount}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Amount must be a positive number");
    }

    assert!(processor.calls().is_empty());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let server = server(FakeProcessor::succeeding());

    let response = server
        .post("/api/payment")
        .add_header(header::ORIGIN, trusted_origin())
        .text("{not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn successful_payment_returns_receipt() {
    let processor = FakeProcessor::succeeding();
    let server = server(processor.clone());

    let response = server
        .post("/api/payment")
        .add_header(header::ORIGIN, trusted_origin())
        .json(&valid_body())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({"success": true, "paymentId": "pi_123", "amount": 1000, "currency": "usd"})
    );

    let calls = processor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.payment_method_id, "pm_card_visa");
    assert_eq!(calls[0].1, "http://localhost:3000/success");
}

#[tokio::test]
async fn currency_defaults_to_usd() {
    let processor = FakeProcessor::succeeding();
    let server = server(processor.clone());

    server
        .post("/api/payment")
        .add_header(header::ORIGIN, trusted_origin())
        .json(&json!({"paymentMethodId": "pm_card_visa", "amount": 1000}))
        .await
        .assert_status_ok();

    assert_eq!(processor.calls()[0].0.currency, "usd");
}

#[tokio::test]
async fn non_succeeded_status_is_payment_failure() {
    let server = server(FakeProcessor::returning(Ok(payment("requires_action"))));

    let response = server
        .post("/api/payment")
        .add_header(header::ORIGIN, trusted_origin())
        .json(&valid_body())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Payment Failed");
    assert_eq!(body["type"], "api_error");
    assert_eq!(body["code"], "payment_failed");
    assert_eq!(body["message"], "Payment failed with status: requires_action");
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn processor_error_type_and_code_are_echoed() {
    let server = server(FakeProcessor::returning(Err(ProcessorError::new(
        "Your card has insufficient funds.",
    )
    .with_kind("card_error")
    .with_code("insufficient_funds")
    .with_details("Your card has insufficient funds."))));

    let response = server
        .post("/api/payment")
        .add_header(header::ORIGIN, trusted_origin())
        .json(&valid_body())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "error": "Payment Failed",
            "type": "card_error",
            "code": "insufficient_funds",
            "message": "Your card has insufficient funds.",
            "details": "Your card has insufficient funds."
        })
    );
}

#[tokio::test]
async fn health_reports_processor() {
    let server = server(FakeProcessor::succeeding());

    let body: Value = server.get("/health").await.json();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["processor"], "fake");
}
