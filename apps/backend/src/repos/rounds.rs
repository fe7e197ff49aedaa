//! Round repository: append-only round history.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use uuid::Uuid;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::domain::scoring::Points;
use crate::domain::state::{Round, RoundEntry};
use crate::entities::{game_rounds, round_scores};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// A recorded round with its storage timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRecord {
    pub round: Round,
    pub created_at: time::OffsetDateTime,
}

fn into_domain(
    model: game_rounds::Model,
    scores: Vec<round_scores::Model>,
) -> Result<RoundRecord, DomainError> {
    let corrupt = |what: &str| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("round {} of game {} has invalid {what}", model.round_no, model.game_id),
        )
    };

    let mut entries = Vec::with_capacity(scores.len());
    for (expected_seat, s) in scores.into_iter().enumerate() {
        if usize::try_from(s.seat).ok() != Some(expected_seat) {
            return Err(corrupt("seat sequence"));
        }
        entries.push(RoundEntry {
            bid: u8::try_from(s.bid).map_err(|_| corrupt("bid"))?,
            actual: u8::try_from(s.actual).map_err(|_| corrupt("actual"))?,
            points: Points::from_tenths(s.points_tenths),
        });
    }

    Ok(RoundRecord {
        round: Round {
            game_id: model.game_id,
            round_number: u32::try_from(model.round_no).map_err(|_| corrupt("round_no"))?,
            entries,
        },
        created_at: model.created_at,
    })
}

/// Append a round. Fails with `RoundAlreadyRecorded` if the number is taken.
pub async fn append_round(txn: &DatabaseTransaction, round: &Round) -> Result<RoundRecord, DomainError> {
    let round_no = i32::try_from(round.round_number).map_err(|_| {
        DomainError::validation(
            ValidationKind::InvalidRoundNumber,
            format!("Round number {} is out of range", round.round_number),
        )
    })?;
    let dto = round.entries.iter().enumerate().try_fold(
        rounds_adapter::RoundCreate::new(round.game_id, round_no),
        |dto, (seat, e)| {
            let seat = i16::try_from(seat).map_err(|_| {
                DomainError::validation(
                    ValidationKind::PlayerCountMismatch,
                    format!("Seat {seat} is out of range"),
                )
            })?;
            Ok::<_, DomainError>(dto.with_score(seat, e.bid, e.actual, e.points.tenths()))
        },
    )?;
    let (model, scores) = rounds_adapter::create_round(txn, dto).await?;
    into_domain(model, scores)
}

/// All rounds of a game, ascending by round number.
pub async fn list_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<RoundRecord>, DomainError> {
    let rounds = rounds_adapter::find_all_by_game(conn, game_id).await?;
    let ids: Vec<i64> = rounds.iter().map(|r| r.id).collect();
    let mut scores = rounds_adapter::find_scores_for_rounds(conn, &ids).await?;

    rounds
        .into_iter()
        .map(|r| {
            let entries = scores.remove(&r.id).unwrap_or_default();
            into_domain(r, entries)
        })
        .collect()
}

pub async fn find_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    round_number: u32,
) -> Result<Option<RoundRecord>, DomainError> {
    let Ok(round_no) = i32::try_from(round_number) else {
        return Ok(None);
    };
    let Some(model) = rounds_adapter::find_by_game_and_round(conn, game_id, round_no).await? else {
        return Ok(None);
    };
    let mut scores = rounds_adapter::find_scores_for_rounds(conn, &[model.id]).await?;
    let entries = scores.remove(&model.id).unwrap_or_default();
    into_domain(model, entries).map(Some)
}
