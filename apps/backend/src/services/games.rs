//! Game orchestration: boundary validation, the round engine, and the repos.

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::progression::{self, RoundOutcome};
use crate::domain::rules;
use crate::domain::scoring::{aggregate_scores, Points, TiePolicy};
use crate::domain::state::{GameState, GameStatus, Round, RoundSubmission};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::games::{self as games_repo, Game};
use crate::repos::rounds::{self as rounds_repo, RoundRecord};

/// A game with its full round history and running totals.
#[derive(Debug, Clone, PartialEq)]
pub struct GameWithRounds {
    pub game: Game,
    pub rounds: Vec<RoundRecord>,
    pub current_scores: Vec<Points>,
}

/// Result of recording a round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSubmitted {
    pub round: RoundRecord,
    pub game: Game,
    pub outcome: RoundOutcome,
}

impl RoundSubmitted {
    pub fn winner(&self) -> Option<&str> {
        self.game.state.winner.as_deref()
    }

    pub fn message(&self) -> String {
        format!(
            "Round {} submitted successfully",
            self.round.round.round_number
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameScores {
    pub game_id: Uuid,
    pub players: Vec<String>,
    pub current_scores: Vec<Points>,
    pub rounds_completed: usize,
    pub total_rounds: u8,
    pub status: GameStatus,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerStatus {
    pub game_id: Uuid,
    pub status: GameStatus,
    pub winner: Option<String>,
    pub is_completed: bool,
}

fn rounds_of(records: &[RoundRecord]) -> Vec<Round> {
    records.iter().map(|r| r.round.clone()).collect()
}

/// Game domain service.
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_game(
        &self,
        txn: &DatabaseTransaction,
        players: Vec<String>,
        total_rounds: u8,
    ) -> Result<Game, AppError> {
        let players = rules::validate_new_game(&players, total_rounds)?;
        let state = GameState::new(Uuid::new_v4(), players, total_rounds);
        let game = games_repo::create_game(txn, &state).await?;
        info!(
            game_id = %game.state.id,
            players = ?game.state.players,
            total_rounds,
            "Created game"
        );
        Ok(game)
    }

    pub async fn get_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: Uuid,
    ) -> Result<GameWithRounds, AppError> {
        let game = games_repo::require_game(txn, game_id).await?;
        let rounds = rounds_repo::list_rounds(txn, game_id).await?;
        let current_scores = aggregate_scores(game.state.players.len(), &rounds_of(&rounds));
        Ok(GameWithRounds {
            game,
            rounds,
            current_scores,
        })
    }

    /// Validate, score and record one round, then persist the next game state.
    ///
    /// The round insert and the optimistic state update share `txn`; a
    /// concurrent submission for the same round fails on either the unique
    /// round index or the lock version.
    pub async fn submit_round(
        &self,
        txn: &DatabaseTransaction,
        game_id: Uuid,
        submission: RoundSubmission,
        tie_policy: TiePolicy,
    ) -> Result<RoundSubmitted, AppError> {
        rules::validate_round_number(submission.round_number)?;
        for (seat, e) in submission.entries.iter().enumerate() {
            rules::validate_entry(seat, e.bid, e.actual)?;
        }

        let game = games_repo::require_game(txn, game_id).await?;
        let history = rounds_repo::list_rounds(txn, game_id).await?;

        let resolution = progression::submit_round(
            &game.state,
            &rounds_of(&history),
            &submission,
            tie_policy,
        )?;
        if !resolution.overridden_claims.is_empty() {
            debug!(
                %game_id,
                seats = ?resolution.overridden_claims,
                "Discarded caller-supplied points that disagreed with recomputed values"
            );
        }

        let round = rounds_repo::append_round(txn, &resolution.round).await?;
        let game =
            games_repo::update_progress(txn, &resolution.next, game.lock_version).await?;

        match &resolution.outcome {
            RoundOutcome::Advanced { next_round } => {
                info!(%game_id, round = submission.round_number, next_round, "Round recorded");
            }
            RoundOutcome::InstantWin { seat } => {
                info!(%game_id, round = submission.round_number, seat, "Instant win; game completed");
            }
            RoundOutcome::FinalRound { winner_seat, totals } => {
                info!(
                    %game_id,
                    round = submission.round_number,
                    winner_seat = ?winner_seat,
                    totals = ?totals.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
                    "Final round recorded; game completed"
                );
            }
        }

        Ok(RoundSubmitted {
            round,
            game,
            outcome: resolution.outcome,
        })
    }

    /// Rounds in ascending order; `GAME_NOT_FOUND` if the game is missing.
    pub async fn list_rounds(
        &self,
        txn: &DatabaseTransaction,
        game_id: Uuid,
    ) -> Result<Vec<RoundRecord>, AppError> {
        games_repo::require_game(txn, game_id).await?;
        Ok(rounds_repo::list_rounds(txn, game_id).await?)
    }

    pub async fn get_round(
        &self,
        txn: &DatabaseTransaction,
        game_id: Uuid,
        round_number: u32,
    ) -> Result<RoundRecord, AppError> {
        games_repo::require_game(txn, game_id).await?;
        rounds_repo::find_round(txn, game_id, round_number)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Round,
                    format!("Round {round_number} not found"),
                )
                .into()
            })
    }

    pub async fn get_scores(
        &self,
        txn: &DatabaseTransaction,
        game_id: Uuid,
    ) -> Result<GameScores, AppError> {
        let GameWithRounds {
            game,
            rounds,
            current_scores,
        } = self.get_game(txn, game_id).await?;
        let state = game.state;
        Ok(GameScores {
            game_id: state.id,
            players: state.players,
            current_scores,
            rounds_completed: rounds.len(),
            total_rounds: state.total_rounds,
            status: state.status,
            winner: state.winner,
        })
    }

    pub async fn get_winner(
        &self,
        txn: &DatabaseTransaction,
        game_id: Uuid,
    ) -> Result<WinnerStatus, AppError> {
        let state = games_repo::require_game(txn, game_id).await?.state;
        Ok(WinnerStatus {
            game_id: state.id,
            status: state.status,
            is_completed: state.is_completed(),
            winner: state.winner,
        })
    }

    /// Delete a game and its rounds; `GAME_NOT_FOUND` if it didn't exist.
    pub async fn delete_game(&self, txn: &DatabaseTransaction, game_id: Uuid) -> Result<(), AppError> {
        if !games_repo::delete_game(txn, game_id).await? {
            return Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("Game {game_id} not found"),
            )
            .into());
        }
        info!(%game_id, "Deleted game");
        Ok(())
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}
