use std::collections::HashSet;
use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const ALLOWED_TOTAL_ROUNDS: [u8; 3] = [2, 3, 5];
pub const BID_RANGE: RangeInclusive<u8> = 1..=13;
pub const ACTUAL_RANGE: RangeInclusive<u8> = 0..=13;
/// Bidding exactly this many and making it ends the game on the spot.
pub const INSTANT_WIN_BID: u8 = 8;

/// Validate a new game's roster and length, returning the normalized names.
///
/// Names are trimmed and NFKC-normalized; blank and duplicate names are
/// rejected since the winner is reported by name.
pub fn validate_new_game(players: &[String], total_rounds: u8) -> Result<Vec<String>, DomainError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayers,
            format!(
                "A game needs {MIN_PLAYERS} to {MAX_PLAYERS} players, got {}",
                players.len()
            ),
        ));
    }
    if !ALLOWED_TOTAL_ROUNDS.contains(&total_rounds) {
        return Err(DomainError::validation(
            ValidationKind::InvalidTotalRounds,
            format!("total_rounds must be one of {ALLOWED_TOTAL_ROUNDS:?}, got {total_rounds}"),
        ));
    }

    let mut seen = HashSet::with_capacity(players.len());
    let mut names = Vec::with_capacity(players.len());
    for (seat, raw) in players.iter().enumerate() {
        let name: String = raw.trim().nfkc().collect();
        if name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayers,
                format!("Player name at position {seat} is blank"),
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayers,
                format!("Player name '{name}' appears more than once"),
            ));
        }
        names.push(name);
    }
    Ok(names)
}

pub fn validate_entry(seat: usize, bid: u8, actual: u8) -> Result<(), DomainError> {
    if !BID_RANGE.contains(&bid) {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            format!(
                "Bid for position {seat} must be between {} and {}, got {bid}",
                BID_RANGE.start(),
                BID_RANGE.end()
            ),
        ));
    }
    if !ACTUAL_RANGE.contains(&actual) {
        return Err(DomainError::validation(
            ValidationKind::InvalidActual,
            format!(
                "Actual for position {seat} must be between {} and {}, got {actual}",
                ACTUAL_RANGE.start(),
                ACTUAL_RANGE.end()
            ),
        ));
    }
    Ok(())
}

pub fn validate_round_number(round_number: u32) -> Result<(), DomainError> {
    if round_number < 1 {
        return Err(DomainError::validation(
            ValidationKind::InvalidRoundNumber,
            "round_number must be at least 1",
        ));
    }
    Ok(())
}
