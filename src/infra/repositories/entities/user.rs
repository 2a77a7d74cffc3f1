//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
        }
    }
}
