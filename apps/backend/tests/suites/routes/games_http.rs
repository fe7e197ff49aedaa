use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use callbreak_backend::AppError;
use serde_json::{json, Value};

use crate::common::{assert_score, read_json};
use crate::support::app_builder::TestAppBuilder;
use crate::support::build_test_state;

async fn create<S>(app: &S, body: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    read_json(resp).await
}

#[actix_web::test]
async fn full_game_over_http() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = TestAppBuilder::new(state).with_prod_routes().build().await;

    let game = create(&app, json!({"players": ["Asha", "Bikram"], "total_rounds": 2})).await;
    assert_eq!(game["status"], "active");
    assert_eq!(game["current_round"], 1);
    assert_eq!(game["winner"], Value::Null);
    let id = game["id"].as_str().expect("id").to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/rounds"))
        .set_json(json!({
            "round_number": 1,
            "entries": [{"bid": 3, "actual": 5, "points": 99.0}, {"bid": 2, "actual": 1}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["message"], "Round 1 submitted successfully");
    assert_eq!(body["winner"], Value::Null);
    assert_score(&body["round"]["player_data"][0]["points"], 3.2);
    assert_score(&body["round"]["player_data"][1]["points"], -2.0);

    // Historical field name is accepted on input too
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/rounds"))
        .set_json(json!({
            "round_number": 2,
            "player_data": [{"bid": 1, "actual": 1, "points": 1.0}, {"bid": 4, "actual": 4, "points": 4.0}]
        }))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    // Asha 3.2 + 1 = 4.2, Bikram -2 + 4 = 2
    assert_eq!(body["winner"], "Asha");

    let req = test::TestRequest::get().uri(&format!("/api/games/{id}")).to_request();
    let detail = read_json(test::call_service(&app, req).await).await;
    assert_eq!(detail["game"]["status"], "completed");
    assert_eq!(detail["game"]["winner"], "Asha");
    assert_eq!(detail["rounds"].as_array().map(Vec::len), Some(2));
    assert_score(&detail["current_scores"][0], 4.2);
    assert_score(&detail["current_scores"][1], 2.0);

    let req = test::TestRequest::get().uri(&format!("/api/games/{id}/scores")).to_request();
    let scores = read_json(test::call_service(&app, req).await).await;
    assert_eq!(scores["rounds_completed"], 2);
    assert_eq!(scores["total_rounds"], 2);
    assert_eq!(scores["players"], json!(["Asha", "Bikram"]));

    let req = test::TestRequest::get().uri(&format!("/api/games/{id}/winner")).to_request();
    let winner = read_json(test::call_service(&app, req).await).await;
    assert_eq!(winner["is_completed"], true);
    assert_eq!(winner["status"], "completed");
    assert_eq!(winner["winner"], "Asha");

    let req = test::TestRequest::get().uri(&format!("/api/games/{id}/rounds")).to_request();
    let rounds = read_json(test::call_service(&app, req).await).await;
    assert_eq!(rounds[0]["round_number"], 1);
    assert_eq!(rounds[1]["round_number"], 2);

    let req = test::TestRequest::get().uri(&format!("/api/games/{id}/rounds/2")).to_request();
    let round = read_json(test::call_service(&app, req).await).await;
    assert_eq!(round["player_data"][1]["bid"], 4);

    Ok(())
}

#[actix_web::test]
async fn rule_violations_render_problem_details() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = TestAppBuilder::new(state).with_prod_routes().build().await;
    let game = create(&app, json!({"players": ["A", "B", "C"], "total_rounds": 3})).await;
    let id = game["id"].as_str().expect("id").to_string();

    let cases = [
        (
            json!({"round_number": 2, "entries": [{"bid": 1, "actual": 1}, {"bid": 1, "actual": 1}, {"bid": 1, "actual": 1}]}),
            "ROUND_OUT_OF_SEQUENCE",
            StatusCode::CONFLICT,
            "Expected round 1, got 2",
        ),
        (
            json!({"round_number": 1, "entries": [{"bid": 1, "actual": 1}]}),
            "PLAYER_COUNT_MISMATCH",
            StatusCode::UNPROCESSABLE_ENTITY,
            "3 players",
        ),
        (
            json!({"round_number": 1, "entries": [{"bid": -1, "actual": 1}, {"bid": 1, "actual": 1}, {"bid": 1, "actual": 1}]}),
            "INVALID_BID",
            StatusCode::UNPROCESSABLE_ENTITY,
            "position 0",
        ),
        (
            json!({"round_number": 1, "entries": [{"bid": 1, "actual": 1}, {"bid": 1, "actual": 20}, {"bid": 1, "actual": 1}]}),
            "INVALID_ACTUAL",
            StatusCode::UNPROCESSABLE_ENTITY,
            "position 1",
        ),
    ];

    for (body, code, status, detail) in cases {
        let req = test::TestRequest::post()
            .uri(&format!("/api/games/{id}/rounds"))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(resp, code, status, Some(detail)).await;
    }
    Ok(())
}

#[actix_web::test]
async fn invalid_game_creation_is_unprocessable() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = TestAppBuilder::new(state).with_prod_routes().build().await;

    let cases = [
        (json!({"players": ["Solo"], "total_rounds": 3}), "INVALID_PLAYERS"),
        (json!({"players": ["A", "B"], "total_rounds": 4}), "INVALID_TOTAL_ROUNDS"),
        (json!({"players": ["A", "B"], "total_rounds": 300}), "INVALID_TOTAL_ROUNDS"),
    ];
    for (body, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/games")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            code,
            StatusCode::UNPROCESSABLE_ENTITY,
            None,
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn unknown_and_deleted_games_are_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = TestAppBuilder::new(state).with_prod_routes().build().await;

    let missing = "7d1f1a5e-3c39-4c43-9d0e-2a2f7b6f4c10";
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{missing}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some(missing),
    )
    .await;

    let game = create(&app, json!({"players": ["A", "B"], "total_rounds": 3})).await;
    let id = game["id"].as_str().expect("id").to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}/rounds/1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "ROUND_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Round 1 not found"),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/games/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["message"], format!("Game {id} deleted successfully"));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/games/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn malformed_path_ids_are_bad_requests() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = TestAppBuilder::new(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/games/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_GAME_ID",
        StatusCode::BAD_REQUEST,
        Some("42"),
    )
    .await;

    let game = create(&app, json!({"players": ["A", "B"], "total_rounds": 3})).await;
    let id = game["id"].as_str().expect("id").to_string();
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}/rounds/first"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_ROUND_NUMBER",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    Ok(())
}
