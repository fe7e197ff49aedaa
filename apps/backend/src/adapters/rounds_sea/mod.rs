//! SeaORM adapter for rounds repository.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{game_rounds, round_scores};

pub mod dto;

pub use dto::{RoundCreate, ScoreCreate};

/// Insert a round and its scores. The unique `(game_id, round_no)` index
/// rejects a second insert for the same round.
pub async fn create_round(
    txn: &DatabaseTransaction,
    dto: RoundCreate,
) -> Result<(game_rounds::Model, Vec<round_scores::Model>), sea_orm::DbErr> {
    let round = game_rounds::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        round_no: Set(dto.round_no),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(txn)
    .await?;

    let mut scores = Vec::with_capacity(dto.scores.len());
    for s in dto.scores {
        let score = round_scores::ActiveModel {
            id: NotSet,
            round_id: Set(round.id),
            seat: Set(s.seat),
            bid: Set(s.bid),
            actual: Set(s.actual),
            points_tenths: Set(s.points_tenths),
        }
        .insert(txn)
        .await?;
        scores.push(score);
    }

    Ok((round, scores))
}

/// Find a round by game_id and round_no
pub async fn find_by_game_and_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    round_no: i32,
) -> Result<Option<game_rounds::Model>, sea_orm::DbErr> {
    game_rounds::Entity::find()
        .filter(game_rounds::Column::GameId.eq(game_id))
        .filter(game_rounds::Column::RoundNo.eq(round_no))
        .one(conn)
        .await
}

/// Find all rounds for a game (ordered by round_no)
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<game_rounds::Model>, sea_orm::DbErr> {
    game_rounds::Entity::find()
        .filter(game_rounds::Column::GameId.eq(game_id))
        .order_by_asc(game_rounds::Column::RoundNo)
        .all(conn)
        .await
}

/// Scores for the given rounds, grouped by round id and ordered by seat.
pub async fn find_scores_for_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
) -> Result<HashMap<i64, Vec<round_scores::Model>>, sea_orm::DbErr> {
    if round_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = round_scores::Entity::find()
        .filter(round_scores::Column::RoundId.is_in(round_ids.iter().copied()))
        .order_by_asc(round_scores::Column::RoundId)
        .order_by_asc(round_scores::Column::Seat)
        .all(conn)
        .await?;

    let mut grouped: HashMap<i64, Vec<round_scores::Model>> = HashMap::new();
    for row in rows {
        grouped.entry(row.round_id).or_default().push(row);
    }
    Ok(grouped)
}
