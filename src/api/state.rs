//! Application state - Dependency injection container.
//!
//! Every service receives its connection and collaborators here at
//! construction; nothing reaches for a global handle.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{
    Database, DocumentStore, FileStorage, HttpLogoSource, RoleRepository, RoleStore, UserStore,
};
use crate::services::{AuthService, Authenticator, DocumentManager, DocumentService, TokenSigner};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Document service
    pub document_service: Arc<dyn DocumentService>,
    /// Role lookup
    pub roles: Arc<dyn RoleRepository>,
    /// Database connection
    pub database: Arc<Database>,
    /// Stored files, served under `/uploads`
    pub storage: FileStorage,
}

impl AppState {
    /// Wire the concrete stores and services from a connected database.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let connection = database.get_connection();
        let storage = FileStorage::new(config.storage_dir.clone());

        let roles: Arc<dyn RoleRepository> = Arc::new(RoleStore::new(connection.clone()));
        let auth_service = Arc::new(Authenticator::new(
            Arc::new(UserStore::new(connection.clone())),
            roles.clone(),
            TokenSigner::from_config(config),
        ));
        let document_service = Arc::new(DocumentManager::new(
            Arc::new(DocumentStore::new(connection)),
            storage.clone(),
            Arc::new(HttpLogoSource::new(config.logo_fetch_timeout)),
        ));

        Self {
            auth_service,
            document_service,
            roles,
            database,
            storage,
        }
    }
}
