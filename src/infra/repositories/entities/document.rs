//! Document database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Document, DocumentStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub filename: String,
    pub original_name: Option<String>,
    pub filepath: String,
    pub size: i64,
    /// One of CREATED, UPLOADED, DELETED
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Document {
    fn from(model: Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|_| {
            tracing::warn!(
                document_id = model.id,
                status = %model.status,
                "Unrecognized stored document status, treating as deleted"
            );
            DocumentStatus::Deleted
        });

        Document {
            id: model.id,
            filename: model.filename,
            original_name: model.original_name,
            filepath: model.filepath,
            size: model.size,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
