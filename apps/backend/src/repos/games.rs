//! Game repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use uuid::Uuid;

use crate::adapters::games_sea as games_adapter;
use crate::domain::state::{GameState, GameStatus};
use crate::entities::{game_players, games};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};

/// Stored game: the domain state plus persistence metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub state: GameState,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
    pub lock_version: i32,
}

fn corrupt(detail: String) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}

fn into_domain(model: games::Model, players: Vec<game_players::Model>) -> Result<Game, DomainError> {
    let players: Vec<String> = players.into_iter().map(|p| p.name).collect();

    let total_rounds = u8::try_from(model.total_rounds)
        .map_err(|_| corrupt(format!("game {} has invalid total_rounds", model.id)))?;
    let current_round = u32::try_from(model.current_round)
        .map_err(|_| corrupt(format!("game {} has invalid current_round", model.id)))?;
    let winner = match model.winner_seat {
        Some(seat) => Some(
            usize::try_from(seat)
                .ok()
                .and_then(|s| players.get(s).cloned())
                .ok_or_else(|| corrupt(format!("game {} winner seat {seat} is unseated", model.id)))?,
        ),
        None => None,
    };
    let status = match model.status {
        games::GameStatus::Active => GameStatus::Active,
        games::GameStatus::Completed => GameStatus::Completed,
    };

    Ok(Game {
        state: GameState {
            id: model.id,
            players,
            total_rounds,
            current_round,
            status,
            winner,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
        lock_version: model.lock_version,
    })
}

async fn hydrate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    model: games::Model,
) -> Result<Game, DomainError> {
    let players = games_adapter::find_players(conn, model.id).await?;
    into_domain(model, players)
}

pub async fn find_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Option<Game>, DomainError> {
    match games_adapter::find_by_id(conn, game_id).await? {
        Some(model) => Ok(Some(hydrate(conn, model).await?)),
        None => Ok(None),
    }
}

/// Find game by ID or return `NotFound(Game)`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Game, DomainError> {
    find_game(conn, game_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found")))
}

pub async fn create_game(txn: &DatabaseTransaction, state: &GameState) -> Result<Game, DomainError> {
    let dto = games_adapter::GameCreate::new(state.id, state.total_rounds)
        .with_players(state.players.iter().cloned());
    let model = games_adapter::create_game(txn, dto).await?;
    hydrate(txn, model).await
}

/// Persist the progress fields of `next` with optimistic locking.
///
/// Only `current_round`, `status` and the winner are written; roster and
/// length never change after creation.
pub async fn update_progress(
    txn: &DatabaseTransaction,
    next: &GameState,
    expected_lock_version: i32,
) -> Result<Game, DomainError> {
    let current_round = i32::try_from(next.current_round).map_err(|_| {
        DomainError::validation(
            ValidationKind::InvalidRoundNumber,
            format!("Round number {} is out of range", next.current_round),
        )
    })?;
    let mut dto = games_adapter::GameProgressUpdate::new(next.id, expected_lock_version, current_round);
    if next.status == GameStatus::Completed {
        let winner_seat = next
            .winner_seat()
            .map(i16::try_from)
            .transpose()
            .map_err(|_| corrupt(format!("game {} winner seat is out of range", next.id)))?;
        dto = dto.completed(winner_seat);
    }
    let model = games_adapter::update_progress(txn, dto).await?;
    hydrate(txn, model).await
}

/// Delete a game and everything it owns. Returns false if it did not exist.
pub async fn delete_game(txn: &DatabaseTransaction, game_id: Uuid) -> Result<bool, DomainError> {
    Ok(games_adapter::delete_game(txn, game_id).await?)
}
