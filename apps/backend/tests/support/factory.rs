//! Service-level shortcuts for arranging games in tests.

use callbreak_backend::db::txn::with_txn;
use callbreak_backend::domain::state::{EntrySubmission, RoundSubmission};
use callbreak_backend::repos::games::Game;
use callbreak_backend::services::games::{GameService, RoundSubmitted};
use callbreak_backend::state::app_state::AppState;
use callbreak_backend::AppError;
use uuid::Uuid;

pub fn submission(round_number: u32, pairs: &[(u8, u8)]) -> RoundSubmission {
    RoundSubmission {
        round_number,
        entries: pairs
            .iter()
            .map(|&(bid, actual)| EntrySubmission::new(bid, actual))
            .collect(),
    }
}

pub async fn create_game(
    state: &AppState,
    players: &[&str],
    total_rounds: u8,
) -> Result<Game, AppError> {
    let players: Vec<String> = players.iter().map(|p| p.to_string()).collect();
    with_txn(state, move |txn| {
        Box::pin(async move {
            GameService::new()
                .create_game(txn, players, total_rounds)
                .await
        })
    })
    .await
}

pub async fn submit(
    state: &AppState,
    game_id: Uuid,
    sub: RoundSubmission,
) -> Result<RoundSubmitted, AppError> {
    let tie_policy = state.game.tie_policy;
    with_txn(state, move |txn| {
        Box::pin(async move {
            GameService::new()
                .submit_round(txn, game_id, sub, tie_policy)
                .await
        })
    })
    .await
}

/// Submit `(bid, actual)` pairs for `round_number`.
pub async fn play(
    state: &AppState,
    game_id: Uuid,
    round_number: u32,
    pairs: &[(u8, u8)],
) -> Result<RoundSubmitted, AppError> {
    submit(state, game_id, submission(round_number, pairs)).await
}
