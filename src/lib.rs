//! PDF Management API
//!
//! A small document backend: users register and log in with JWT, then
//! generate PDF reports, upload PDFs, list them with paging and a status
//! filter, and soft-delete them.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities (documents, users, roles, passwords)
//! - **services**: Use cases (authentication, document lifecycle)
//! - **render**: PDF layout and painting
//! - **infra**: Database, file storage and logo fetching
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod render;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Document, DocumentStatus, Password, User};
pub use errors::{AppError, AppResult};
