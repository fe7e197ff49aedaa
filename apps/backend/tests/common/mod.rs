#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Read a successful response body as JSON.
pub async fn read_json(resp: ServiceResponse<BoxBody>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response body should be JSON")
}

/// Compare a JSON number against an expected score.
pub fn assert_score(value: &Value, expected: f64) {
    let actual = value.as_f64().expect("score should be a number");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected score {expected}, got {actual}"
    );
}
