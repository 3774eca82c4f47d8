//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub phone_number: String,
    pub post_code: String,
    pub role_id: i64,
    pub is_email_verified: bool,
    pub created_by: Option<i64>,
    pub created_date: DateTimeUtc,
    pub modified_by: Option<i64>,
    pub modified_date: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            address: model.address,
            phone_number: model.phone_number,
            post_code: model.post_code,
            role_id: model.role_id,
            is_email_verified: model.is_email_verified,
            created_by: model.created_by,
            created_date: model.created_date,
            modified_by: model.modified_by,
            modified_date: model.modified_date,
        }
    }
}
