//! Round submission state machine.

use crate::domain::scoring::{
    aggregate_scores, compute_points, is_instant_win, resolve_winner, Points, TiePolicy,
};
use crate::domain::state::{GameState, GameStatus, Round, RoundEntry, RoundSubmission};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Game continues; `next_round` is now expected.
    Advanced { next_round: u32 },
    /// A seat bid 8 and made it; the game ended immediately.
    InstantWin { seat: usize },
    /// Last scheduled round recorded. `winner_seat` is `None` only for a
    /// shared top score under `TiePolicy::Draw`.
    FinalRound {
        winner_seat: Option<usize>,
        totals: Vec<Points>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundResolution {
    pub round: Round,
    pub next: GameState,
    pub outcome: RoundOutcome,
    /// Seats whose caller-claimed points disagreed with the recomputed value.
    pub overridden_claims: Vec<usize>,
}

impl RoundResolution {
    pub fn winner(&self) -> Option<&str> {
        self.next.winner.as_deref()
    }
}

/// Validate a submission against `state`, score it, and produce the next state.
///
/// `history` holds the rounds already recorded for the game. Nothing is
/// mutated: on error the caller's state is untouched, on success the caller
/// persists `round` and `next` together.
pub fn submit_round(
    state: &GameState,
    history: &[Round],
    submission: &RoundSubmission,
    tie_policy: TiePolicy,
) -> Result<RoundResolution, DomainError> {
    if state.status != GameStatus::Active {
        return Err(DomainError::validation(
            ValidationKind::InvalidState,
            "Game is not active",
        ));
    }
    if submission.round_number != state.current_round {
        return Err(DomainError::validation(
            ValidationKind::SequenceMismatch,
            format!(
                "Expected round {}, got {}",
                state.current_round, submission.round_number
            ),
        ));
    }
    if submission.entries.len() != state.players.len() {
        return Err(DomainError::validation(
            ValidationKind::PlayerCountMismatch,
            format!(
                "Round has {} entries but the game has {} players",
                submission.entries.len(),
                state.players.len()
            ),
        ));
    }

    let mut entries = Vec::with_capacity(submission.entries.len());
    let mut overridden_claims = Vec::new();
    let mut instant_winner: Option<usize> = None;
    for (seat, e) in submission.entries.iter().enumerate() {
        let points = compute_points(e.bid, e.actual);
        if let Some(claimed) = e.claimed_points {
            if Points::from_f64_lossy(claimed) != points {
                overridden_claims.push(seat);
            }
        }
        // First seat in index order keeps the instant win.
        if instant_winner.is_none() && is_instant_win(e.bid, e.actual) {
            instant_winner = Some(seat);
        }
        entries.push(RoundEntry {
            bid: e.bid,
            actual: e.actual,
            points,
        });
    }

    let round = Round {
        game_id: state.id,
        round_number: submission.round_number,
        entries,
    };

    let mut next = state.clone();
    let outcome = if let Some(seat) = instant_winner {
        next.status = GameStatus::Completed;
        next.winner = Some(state.players[seat].clone());
        RoundOutcome::InstantWin { seat }
    } else if submission.round_number >= u32::from(state.total_rounds) {
        let mut all_rounds: Vec<Round> = history
            .iter()
            .filter(|r| r.round_number != round.round_number)
            .cloned()
            .collect();
        all_rounds.push(round.clone());
        let totals = aggregate_scores(state.players.len(), &all_rounds);
        let winner_seat = resolve_winner(&totals, tie_policy);
        next.status = GameStatus::Completed;
        next.winner = winner_seat.map(|seat| state.players[seat].clone());
        RoundOutcome::FinalRound {
            winner_seat,
            totals,
        }
    } else {
        next.current_round = submission.round_number + 1;
        RoundOutcome::Advanced {
            next_round: next.current_round,
        }
    };

    Ok(RoundResolution {
        round,
        next,
        outcome,
        overridden_claims,
    })
}
