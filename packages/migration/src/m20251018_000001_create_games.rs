use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    Status,
    TotalRounds,
    CurrentRound,
    WinnerSeat,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum GamePlayers {
    Table,
    Id,
    GameId,
    Seat,
    Name,
}

#[derive(Iden)]
enum GameRounds {
    Table,
    Id,
    GameId,
    RoundNo,
    CreatedAt,
}

#[derive(Iden)]
enum RoundScores {
    Table,
    Id,
    RoundId,
    Seat,
    Bid,
    Actual,
    PointsTenths,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Games::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(ColumnDef::new(Games::TotalRounds).small_integer().not_null())
                    .col(
                        ColumnDef::new(Games::CurrentRound)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Games::WinnerSeat).small_integer().null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        // game_players
        manager
            .create_table(
                Table::create()
                    .table(GamePlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GamePlayers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(GamePlayers::GameId).uuid().not_null())
                    .col(ColumnDef::new(GamePlayers::Seat).small_integer().not_null())
                    .col(ColumnDef::new(GamePlayers::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_players_game_id")
                            .from(GamePlayers::Table, GamePlayers::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_players_game_seat")
                    .table(GamePlayers::Table)
                    .col(GamePlayers::GameId)
                    .col(GamePlayers::Seat)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // game_rounds
        manager
            .create_table(
                Table::create()
                    .table(GameRounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameRounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(GameRounds::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameRounds::RoundNo).integer().not_null())
                    .col(
                        ColumnDef::new(GameRounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_rounds_game_id")
                            .from(GameRounds::Table, GameRounds::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (game, round number); backs the submit-in-order guarantee
        manager
            .create_index(
                Index::create()
                    .name("ux_game_rounds_game_round")
                    .table(GameRounds::Table)
                    .col(GameRounds::GameId)
                    .col(GameRounds::RoundNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // round_scores
        manager
            .create_table(
                Table::create()
                    .table(RoundScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundScores::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(RoundScores::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(RoundScores::Seat).small_integer().not_null())
                    .col(ColumnDef::new(RoundScores::Bid).small_integer().not_null())
                    .col(ColumnDef::new(RoundScores::Actual).small_integer().not_null())
                    .col(ColumnDef::new(RoundScores::PointsTenths).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_scores_round_id")
                            .from(RoundScores::Table, RoundScores::RoundId)
                            .to(GameRounds::Table, GameRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_scores_round_seat")
                    .table(RoundScores::Table)
                    .col(RoundScores::RoundId)
                    .col(RoundScores::Seat)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_round_scores_round_seat")
                    .table(RoundScores::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(RoundScores::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_game_rounds_game_round")
                    .table(GameRounds::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(GameRounds::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_game_players_game_seat")
                    .table(GamePlayers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(GamePlayers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        Ok(())
    }
}
