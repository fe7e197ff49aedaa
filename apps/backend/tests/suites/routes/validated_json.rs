use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use callbreak_backend::extractors::validated_json::MAX_BODY_BYTES;
use callbreak_backend::AppError;

use crate::support::app_builder::TestAppBuilder;
use crate::support::build_test_state;

async fn post_raw(body: &'static str) -> Result<actix_web::dev::ServiceResponse, AppError> {
    let state = build_test_state().await?;
    let app = TestAppBuilder::new(state).with_prod_routes().build().await;
    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload(body)
        .to_request();
    Ok(test::call_service(&app, req).await)
}

#[actix_web::test]
async fn syntax_error_is_bad_request() -> Result<(), AppError> {
    let resp = post_raw("{\"players\": [\"A\",, \"B\"]}").await?;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn missing_field_is_named() -> Result<(), AppError> {
    let resp = post_raw(r#"{"players": ["A", "B"]}"#).await?;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("missing field `total_rounds`"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn wrong_type_is_bad_request() -> Result<(), AppError> {
    let resp = post_raw(r#"{"players": "A,B", "total_rounds": 3}"#).await?;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid request body"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn oversized_body_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = TestAppBuilder::new(state).with_prod_routes().build().await;
    let padding = "x".repeat(MAX_BODY_BYTES);
    let body = format!(r#"{{"players": ["{padding}", "B"], "total_rounds": 3}}"#);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("exceeds"),
    )
    .await;
    Ok(())
}
