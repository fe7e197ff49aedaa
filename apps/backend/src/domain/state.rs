use uuid::Uuid;

use crate::domain::scoring::Points;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Completed,
}

impl GameStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Completed => "completed",
        }
    }
}

/// Authoritative state of one game.
///
/// `current_round` is the next round the game expects and is only ever
/// moved by `progression::submit_round`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub id: Uuid,
    /// Seat order is fixed for the lifetime of the game.
    pub players: Vec<String>,
    pub total_rounds: u8,
    pub current_round: u32,
    pub status: GameStatus,
    pub winner: Option<String>,
}

impl GameState {
    pub fn new(id: Uuid, players: Vec<String>, total_rounds: u8) -> Self {
        Self {
            id,
            players,
            total_rounds,
            current_round: 1,
            status: GameStatus::Active,
            winner: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    pub fn winner_seat(&self) -> Option<usize> {
        let name = self.winner.as_deref()?;
        self.players.iter().position(|p| p == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEntry {
    pub bid: u8,
    pub actual: u8,
    pub points: Points,
}

/// One recorded round; entries are aligned with `GameState::players`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub game_id: Uuid,
    pub round_number: u32,
    pub entries: Vec<RoundEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntrySubmission {
    pub bid: u8,
    pub actual: u8,
    /// Points the caller believes were earned; never trusted.
    pub claimed_points: Option<f64>,
}

impl EntrySubmission {
    pub fn new(bid: u8, actual: u8) -> Self {
        Self {
            bid,
            actual,
            claimed_points: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSubmission {
    pub round_number: u32,
    pub entries: Vec<EntrySubmission>,
}
