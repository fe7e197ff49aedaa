//! SeaORM adapter for game repository - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{game_players, game_rounds, games, round_scores};
use crate::infra::db_errors::OPTIMISTIC_LOCK_PREFIX;

pub mod dto;

pub use dto::{GameCreate, GameProgressUpdate};

// Adapter functions return DbErr; the repos layer maps to DomainError.

fn game_not_found(id: Uuid) -> sea_orm::DbErr {
    sea_orm::DbErr::RecordNotFound(format!("Game {id} not found"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find game by ID or return `RecordNotFound`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| game_not_found(game_id))
}

/// Seated players, ordered by seat.
pub async fn find_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<game_players::Model>, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .order_by_asc(game_players::Column::Seat)
        .all(conn)
        .await
}

pub async fn create_game(
    txn: &DatabaseTransaction,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game = games::ActiveModel {
        id: Set(dto.id),
        status: Set(games::GameStatus::Active),
        total_rounds: Set(dto.total_rounds),
        current_round: Set(1),
        winner_seat: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    }
    .insert(txn)
    .await?;

    let seats = (0_i16..)
        .zip(dto.players)
        .map(|(seat, name)| game_players::ActiveModel {
            id: NotSet,
            game_id: Set(dto.id),
            seat: Set(seat),
            name: Set(name),
        });
    game_players::Entity::insert_many(seats).exec(txn).await?;

    Ok(game)
}

/// Optimistic progress update, then refetch.
///
/// Zero affected rows means either the game is gone (`RecordNotFound`) or
/// someone else moved `lock_version` (`OPTIMISTIC_LOCK:` sentinel).
pub async fn update_progress(
    txn: &DatabaseTransaction,
    dto: GameProgressUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = games::Entity::update_many()
        .col_expr(games::Column::CurrentRound, Expr::val(dto.current_round).into())
        .col_expr(games::Column::Status, Expr::val(dto.status).into())
        .col_expr(games::Column::WinnerSeat, Expr::val(dto.winner_seat).into())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::LockVersion.eq(dto.expected_version))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(txn, dto.id).await? {
            Some(game) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                dto.expected_version, game.lock_version
            ))),
            None => Err(game_not_found(dto.id)),
        };
    }

    require_game(txn, dto.id).await
}

/// Delete a game with its players, rounds and scores. Returns false if absent.
pub async fn delete_game(txn: &DatabaseTransaction, game_id: Uuid) -> Result<bool, sea_orm::DbErr> {
    let round_ids = Query::select()
        .column(game_rounds::Column::Id)
        .from(game_rounds::Entity)
        .and_where(Expr::col(game_rounds::Column::GameId).eq(game_id))
        .to_owned();

    round_scores::Entity::delete_many()
        .filter(round_scores::Column::RoundId.in_subquery(round_ids))
        .exec(txn)
        .await?;
    game_rounds::Entity::delete_many()
        .filter(game_rounds::Column::GameId.eq(game_id))
        .exec(txn)
        .await?;
    game_players::Entity::delete_many()
        .filter(game_players::Column::GameId.eq(game_id))
        .exec(txn)
        .await?;

    let res = games::Entity::delete_by_id(game_id).exec(txn).await?;
    Ok(res.rows_affected > 0)
}
