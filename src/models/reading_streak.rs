use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

// Une ligne par (user, date) : "ce jour-là, une session de lecture a eu lieu".
// Contrainte UNIQUE (user_id, date) côté base ; pages_read ne fait que croître
// (upsert additif, voir StreakService::add_reading_streak).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reading_streaks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub date: Date,
    pub pages_read: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
