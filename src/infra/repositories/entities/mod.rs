//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod document;
pub mod role;
pub mod user;
