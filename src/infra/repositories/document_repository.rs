//! Document repository with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::document::{self, ActiveModel, Entity as DocumentEntity};
use crate::domain::{Document, DocumentStatus, NewDocument};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Document repository trait for dependency injection.
///
/// Lookups by ID include soft-deleted records; listing only hides them
/// when the caller filters on a live status.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a new record and return it with its assigned ID
    async fn create(&self, document: NewDocument) -> AppResult<Document>;

    /// Find document by ID, whatever its status
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Document>>;

    /// One page of documents, newest first, with the total match count
    async fn list(
        &self,
        status: Option<DocumentStatus>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Document>, u64)>;

    /// Mark a live document as deleted and return the updated record
    async fn soft_delete(&self, id: i64) -> AppResult<Document>;
}

/// Concrete implementation of DocumentRepository
pub struct DocumentStore {
    db: DatabaseConnection,
}

impl DocumentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentRepository for DocumentStore {
    async fn create(&self, document: NewDocument) -> AppResult<Document> {
        let active_model = ActiveModel {
            filename: Set(document.filename),
            original_name: Set(document.original_name),
            filepath: Set(document.filepath),
            size: Set(document.size),
            status: Set(document.status.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            updated_at: Set(None),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Document::from(model))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Document>> {
        let result = DocumentEntity::find_by_id(id).one(&self.db).await?;

        Ok(result.map(Document::from))
    }

    async fn list(
        &self,
        status: Option<DocumentStatus>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Document>, u64)> {
        let mut query = DocumentEntity::find();
        if let Some(status) = status {
            query = query.filter(document::Column::Status.eq(status.as_str()));
        }

        let total = query.clone().count(&self.db).await?;

        let models = query
            .order_by_desc(document::Column::CreatedAt)
            .order_by_desc(document::Column::Id)
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(Document::from).collect(), total))
    }

    async fn soft_delete(&self, id: i64) -> AppResult<Document> {
        let now = chrono::Utc::now();

        let deletable: Vec<&str> = DocumentStatus::sources_of(DocumentStatus::Deleted)
            .iter()
            .map(DocumentStatus::as_str)
            .collect();

        // Single conditional update so concurrent deletes cannot both win
        let result = DocumentEntity::update_many()
            .col_expr(
                document::Column::Status,
                Expr::value(DocumentStatus::Deleted.as_str()),
            )
            .col_expr(document::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(document::Column::UpdatedAt, Expr::value(Some(now)))
            .filter(document::Column::Id.eq(id))
            .filter(document::Column::Status.is_in(deletable))
            .exec(&self.db)
            .await?;

        let current = self.find_by_id(id).await?;

        match (result.rows_affected, current) {
            (_, None) => Err(AppError::NotFound("Document")),
            (0, Some(_)) => Err(AppError::AlreadyDeleted),
            (_, Some(document)) => Ok(document),
        }
    }
}
