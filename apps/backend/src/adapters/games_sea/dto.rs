//! DTOs for games_sea adapter.

use uuid::Uuid;

use crate::entities::games::GameStatus;

/// DTO for creating a new game with its seated players.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub id: Uuid,
    pub total_rounds: i16,
    /// Player names in seat order.
    pub players: Vec<String>,
}

impl GameCreate {
    pub fn new(id: Uuid, total_rounds: u8) -> Self {
        Self {
            id,
            total_rounds: i16::from(total_rounds),
            players: Vec::new(),
        }
    }

    pub fn with_players(mut self, players: impl IntoIterator<Item = String>) -> Self {
        self.players = players.into_iter().collect();
        self
    }
}

/// Progress update applied after a round is recorded.
///
/// `expected_version` must match the stored `lock_version`; the update
/// bumps it by one.
#[derive(Debug, Clone)]
pub struct GameProgressUpdate {
    pub id: Uuid,
    pub expected_version: i32,
    pub current_round: i32,
    pub status: GameStatus,
    pub winner_seat: Option<i16>,
}

impl GameProgressUpdate {
    pub fn new(id: Uuid, expected_version: i32, current_round: i32) -> Self {
        Self {
            id,
            expected_version,
            current_round,
            status: GameStatus::Active,
            winner_seat: None,
        }
    }

    pub fn completed(mut self, winner_seat: Option<i16>) -> Self {
        self.status = GameStatus::Completed;
        self.winner_seat = winner_seat;
        self
    }
}
