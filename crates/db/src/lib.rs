//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for exports and their transition history
//! - Repository abstractions for data access
//! - Database migrations
//!
//! The workflow repository here is the only component that mutates an
//! export's status; everything it persists has been validated by
//! `cofex-core` first.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{ExportRepository, WorkflowRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
