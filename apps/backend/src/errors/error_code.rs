//! Error codes for the Call Break backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Path segment is not a valid game id
    InvalidGameId,
    InvalidBid,
    InvalidActual,
    InvalidPlayers,
    InvalidTotalRounds,
    InvalidRoundNumber,
    /// Entry count does not match the game's player count
    PlayerCountMismatch,
    /// General validation error
    ValidationError,
    /// Malformed request body
    BadRequest,

    // Game Progression
    /// Game is completed and accepts no further rounds
    GameNotActive,
    /// Round number is not the one the game expects next
    RoundOutOfSequence,

    // Resource Not Found
    GameNotFound,
    RoundNotFound,
    NotFound,

    // Conflicts
    DuplicateId,
    RoundAlreadyRecorded,
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbUnavailable,
    DbTimeout,
    InternalError,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidBid => "INVALID_BID",
            Self::InvalidActual => "INVALID_ACTUAL",
            Self::InvalidPlayers => "INVALID_PLAYERS",
            Self::InvalidTotalRounds => "INVALID_TOTAL_ROUNDS",
            Self::InvalidRoundNumber => "INVALID_ROUND_NUMBER",
            Self::PlayerCountMismatch => "PLAYER_COUNT_MISMATCH",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotActive => "GAME_NOT_ACTIVE",
            Self::RoundOutOfSequence => "ROUND_OUT_OF_SEQUENCE",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicateId => "DUPLICATE_ID",
            Self::RoundAlreadyRecorded => "ROUND_ALREADY_RECORDED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
