//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - File storage for generated and uploaded PDFs
//! - Logo fetching over HTTP

pub mod db;
pub mod logo;
pub mod repositories;
pub mod storage;

pub use db::{Database, Migrator};
pub use logo::{HttpLogoSource, LogoSource, NoLogo};
pub use repositories::{
    DocumentRepository, DocumentStore, RoleRepository, RoleStore, UserRepository, UserStore,
};
pub use storage::{FileStorage, StoredFile};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockDocumentRepository, MockRoleRepository, MockUserRepository};
