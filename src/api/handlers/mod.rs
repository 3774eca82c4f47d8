//! HTTP request handlers.

pub mod auth_handler;
pub mod document_handler;
pub mod role_handler;

pub use auth_handler::auth_routes;
pub use document_handler::document_routes;
