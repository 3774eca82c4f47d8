//! Role lookup repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use super::entities::role::{self, ActiveModel, Entity as RoleEntity};
use crate::config::DEFAULT_ROLE_LABELS;
use crate::domain::Role;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// All roles ordered by ID
    async fn list(&self) -> AppResult<Vec<Role>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>>;

    /// Insert the default roles when the table is empty.
    /// Returns the number of rows inserted.
    async fn seed_defaults(&self) -> AppResult<usize>;
}

pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn list(&self) -> AppResult<Vec<Role>> {
        let models = RoleEntity::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Role::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>> {
        let result = RoleEntity::find_by_id(id).one(&self.db).await?;

        Ok(result.map(Role::from))
    }

    async fn seed_defaults(&self) -> AppResult<usize> {
        if RoleEntity::find().count(&self.db).await? > 0 {
            return Ok(0);
        }

        for label in DEFAULT_ROLE_LABELS {
            ActiveModel {
                label: Set(label.to_string()),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;
        }

        tracing::info!(count = DEFAULT_ROLE_LABELS.len(), "Seeded default roles");
        Ok(DEFAULT_ROLE_LABELS.len())
    }
}
