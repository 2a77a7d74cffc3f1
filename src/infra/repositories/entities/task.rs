//! Task database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Task;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub content: String,
    pub due_date: Option<Date>,
    pub completed: bool,
    /// Owning user (NOT NULL foreign key)
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Task {
            id: model.id,
            content: model.content,
            due_date: model.due_date,
            completed: model.completed,
            user_id: model.user_id,
        }
    }
}
