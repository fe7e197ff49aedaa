use actix_web::test;
use callbreak_backend::config::game::GameConfig;
use callbreak_backend::state::app_state::AppState;
use callbreak_backend::AppError;

use crate::common::read_json;
use crate::support::app_builder::TestAppBuilder;
use crate::support::build_test_state;

#[actix_web::test]
async fn health_reports_db_and_latest_migration() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = TestAppBuilder::new(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migration"], "m20251018_000001_create_games");
    assert!(body.get("db_error").is_none());
    Ok(())
}

#[actix_web::test]
async fn health_without_db_still_answers() {
    let app = TestAppBuilder::new(AppState::without_db(GameConfig::default()))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert_eq!(body["migration"], "unknown");
}
