//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits, so tests can
//! swap in mocks.

mod auth_service;
mod document_service;
mod token;

pub use auth_service::{AuthService, Authenticator, LoginResponse, Registration};
pub use document_service::{DocumentManager, DocumentService, ReportRequest, UploadedFile};
pub use token::{Claims, TokenSigner};
