//! Game-related HTTP routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::domain::scoring::Points;
use crate::domain::state::{EntrySubmission, RoundSubmission};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;
use crate::extractors::{GameId, ValidatedJson};
use crate::repos::games::Game;
use crate::repos::rounds::RoundRecord;
use crate::services::games::{GameScores, GameService, GameWithRounds, WinnerStatus};
use crate::state::app_state::AppState;

// ---------- requests ----------

/// Wide integer fields so out-of-range values surface as 422 rule errors
/// rather than 400 decode errors.
#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub players: Vec<String>,
    pub total_rounds: i64,
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub bid: i64,
    pub actual: i64,
    #[serde(default)]
    pub points: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRoundRequest {
    pub round_number: i64,
    #[serde(alias = "player_data")]
    pub entries: Vec<EntryRequest>,
}

fn narrow<T: TryFrom<i64>>(
    value: i64,
    kind: ValidationKind,
    detail: impl FnOnce() -> String,
) -> Result<T, AppError> {
    T::try_from(value).map_err(|_| DomainError::validation(kind, detail()).into())
}

impl SubmitRoundRequest {
    fn into_submission(self) -> Result<RoundSubmission, AppError> {
        let round_number = narrow(self.round_number, ValidationKind::InvalidRoundNumber, || {
            if self.round_number < 1 {
                format!("Round number must be at least 1, got {}", self.round_number)
            } else {
                format!("Round number {} is out of range", self.round_number)
            }
        })?;
        let entries = self
            .entries
            .into_iter()
            .enumerate()
            .map(|(seat, e)| {
                let bid = narrow(e.bid, ValidationKind::InvalidBid, || {
                    format!("Bid for position {seat} must be between 1 and 13, got {}", e.bid)
                })?;
                let actual = narrow(e.actual, ValidationKind::InvalidActual, || {
                    format!("Actual for position {seat} must be between 0 and 13, got {}", e.actual)
                })?;
                Ok(EntrySubmission {
                    bid,
                    actual,
                    claimed_points: e.points,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(RoundSubmission {
            round_number,
            entries,
        })
    }
}

// ---------- responses ----------

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub id: Uuid,
    pub players: Vec<String>,
    pub total_rounds: u8,
    pub current_round: u32,
    pub status: &'static str,
    pub winner: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        let state = game.state;
        Self {
            id: state.id,
            status: state.status.as_str(),
            players: state.players,
            total_rounds: state.total_rounds,
            current_round: state.current_round,
            winner: state.winner,
            created_at: game.created_at,
            updated_at: game.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub bid: u8,
    pub actual: u8,
    pub points: Points,
}

/// Round as clients see it; entries keep the historical `player_data` key.
#[derive(Debug, Serialize)]
pub struct RoundResponse {
    pub game_id: Uuid,
    pub round_number: u32,
    pub player_data: Vec<EntryResponse>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<RoundRecord> for RoundResponse {
    fn from(record: RoundRecord) -> Self {
        Self {
            game_id: record.round.game_id,
            round_number: record.round.round_number,
            player_data: record
                .round
                .entries
                .into_iter()
                .map(|e| EntryResponse {
                    bid: e.bid,
                    actual: e.actual,
                    points: e.points,
                })
                .collect(),
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameWithRoundsResponse {
    pub game: GameResponse,
    pub rounds: Vec<RoundResponse>,
    pub current_scores: Vec<Points>,
}

impl From<GameWithRounds> for GameWithRoundsResponse {
    fn from(g: GameWithRounds) -> Self {
        Self {
            game: g.game.into(),
            rounds: g.rounds.into_iter().map(Into::into).collect(),
            current_scores: g.current_scores,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoundSubmittedResponse {
    pub round: RoundResponse,
    pub winner: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ScoresResponse {
    pub game_id: Uuid,
    pub players: Vec<String>,
    pub current_scores: Vec<Points>,
    pub rounds_completed: usize,
    pub total_rounds: u8,
    pub status: &'static str,
    pub winner: Option<String>,
}

impl From<GameScores> for ScoresResponse {
    fn from(s: GameScores) -> Self {
        Self {
            game_id: s.game_id,
            players: s.players,
            current_scores: s.current_scores,
            rounds_completed: s.rounds_completed,
            total_rounds: s.total_rounds,
            status: s.status.as_str(),
            winner: s.winner,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WinnerResponse {
    pub game_id: Uuid,
    pub status: &'static str,
    pub winner: Option<String>,
    pub is_completed: bool,
}

impl From<WinnerStatus> for WinnerResponse {
    fn from(w: WinnerStatus) -> Self {
        Self {
            game_id: w.game_id,
            status: w.status.as_str(),
            winner: w.winner,
            is_completed: w.is_completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------- handlers ----------

/// POST /api/games
async fn create_game(
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateGameRequest {
        players,
        total_rounds,
    } = body.into_inner();
    let total_rounds: u8 = narrow(total_rounds, ValidationKind::InvalidTotalRounds, || {
        format!("Total rounds must be one of 2, 3 or 5, got {total_rounds}")
    })?;

    let game = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            GameService::new()
                .create_game(txn, players, total_rounds)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameResponse::from(game)))
}

/// GET /api/games/{game_id}
async fn get_game(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let game = with_txn(&app_state, move |txn| {
        Box::pin(async move { GameService::new().get_game(txn, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameWithRoundsResponse::from(game)))
}

/// POST /api/games/{game_id}/rounds
///
/// Points in the body are advisory; the stored values are always recomputed.
async fn submit_round(
    game_id: GameId,
    body: ValidatedJson<SubmitRoundRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let submission = body.into_inner().into_submission()?;
    let tie_policy = app_state.game.tie_policy;

    let submitted = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            GameService::new()
                .submit_round(txn, id, submission, tie_policy)
                .await
        })
    })
    .await?;

    let message = submitted.message();
    let winner = submitted.winner().map(str::to_owned);
    Ok(HttpResponse::Ok().json(RoundSubmittedResponse {
        round: submitted.round.into(),
        winner,
        message,
    }))
}

/// GET /api/games/{game_id}/rounds
async fn list_rounds(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let rounds = with_txn(&app_state, move |txn| {
        Box::pin(async move { GameService::new().list_rounds(txn, id).await })
    })
    .await?;

    let body: Vec<RoundResponse> = rounds.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

fn round_number_param(req: &HttpRequest) -> Result<u32, AppError> {
    let raw = req.match_info().get("round_number").unwrap_or_default();
    raw.parse::<u32>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidRoundNumber,
            format!("Invalid round number: {raw}"),
        )
    })
}

/// GET /api/games/{game_id}/rounds/{round_number}
async fn get_round(
    req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let round_number = round_number_param(&req)?;
    let round = with_txn(&app_state, move |txn| {
        Box::pin(async move { GameService::new().get_round(txn, id, round_number).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(RoundResponse::from(round)))
}

/// GET /api/games/{game_id}/scores
async fn get_scores(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let scores = with_txn(&app_state, move |txn| {
        Box::pin(async move { GameService::new().get_scores(txn, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ScoresResponse::from(scores)))
}

/// GET /api/games/{game_id}/winner
async fn get_winner(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let status = with_txn(&app_state, move |txn| {
        Box::pin(async move { GameService::new().get_winner(txn, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(WinnerResponse::from(status)))
}

/// DELETE /api/games/{game_id}
async fn delete_game(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    with_txn(&app_state, move |txn| {
        Box::pin(async move { GameService::new().delete_game(txn, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Game {id} deleted successfully"),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_game))
        .route("/", web::post().to(create_game))
        .route("/{game_id}", web::get().to(get_game))
        .route("/{game_id}", web::delete().to(delete_game))
        .route("/{game_id}/rounds", web::post().to(submit_round))
        .route("/{game_id}/rounds", web::get().to(list_rounds))
        .route("/{game_id}/rounds/{round_number}", web::get().to(get_round))
        .route("/{game_id}/scores", web::get().to(get_scores))
        .route("/{game_id}/winner", web::get().to(get_winner));
}
