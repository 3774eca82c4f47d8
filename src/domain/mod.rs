//! Domain layer - Core business entities and logic
//!
//! Documents with their lifecycle status, users, roles and the password
//! value object. Nothing here touches the database or HTTP.

pub mod document;
pub mod password;
pub mod user;

pub use document::{Document, DocumentStatus, NewDocument, UnknownStatus};
pub use password::Password;
pub use user::{NewUser, Role, User, UserResponse};
