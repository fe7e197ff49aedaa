use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "round_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    #[sea_orm(column_type = "SmallInteger")]
    pub seat: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub bid: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub actual: i16,
    /// Points in tenths; see `domain::scoring::Points`.
    #[sea_orm(column_name = "points_tenths")]
    pub points_tenths: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_rounds::Entity",
        from = "Column::RoundId",
        to = "super::game_rounds::Column::Id",
        on_delete = "Cascade"
    )]
    GameRound,
}

impl Related<super::game_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameRound.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
