use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

// Statuts valides pour la colonne `status`
// Le même livre peut occuper plusieurs statuts en même temps (lignes
// indépendantes), mais jamais deux fois le même statut.
pub const STATUS_CURRENTLY_READING: &str = "currently_reading";
pub const STATUS_FINISHED: &str = "finished";
pub const STATUS_FAVOURITE: &str = "favourite";

pub fn is_valid_status(status: &str) -> bool {
    matches!(
        status,
        STATUS_CURRENTLY_READING | STATUS_FINISHED | STATUS_FAVOURITE
    )
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub status: String,
    pub current_page: i32,
    pub date_added: Option<DateTime>,
    pub date_finished: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
