//! Shared helpers for domain unit and property tests.

use proptest::test_runner::Config;
use uuid::Uuid;

use crate::domain::state::{EntrySubmission, GameState, RoundSubmission};

pub fn proptest_config() -> Config {
    Config {
        cases: 256,
        ..Config::default()
    }
}

pub fn game(players: &[&str], total_rounds: u8) -> GameState {
    GameState::new(
        Uuid::new_v4(),
        players.iter().map(|p| p.to_string()).collect(),
        total_rounds,
    )
}

/// Submission from `(bid, actual)` pairs in seat order.
pub fn submission(round_number: u32, pairs: &[(u8, u8)]) -> RoundSubmission {
    RoundSubmission {
        round_number,
        entries: pairs
            .iter()
            .map(|&(bid, actual)| EntrySubmission::new(bid, actual))
            .collect(),
    }
}
