//! Database operations for the `SQLite` store.
//!
//! ## Tables
//!
//! - `admins` - Administrator accounts (bcrypt password hashes)
//! - `content` - Generic content items (carousel slides, about section)
//! - `services` - Service/product cards
//! - `gallery` - Gallery images (create/delete only)
//! - `contact_messages` - Public contact form submissions
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/server/migrations/` and run at
//! startup via [`MIGRATOR`].

pub mod admins;
pub mod contact;
pub mod content;
pub mod gallery;
pub mod services;

use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use contact::ContactRepository;
pub use content::ContentRepository;
pub use gallery::GalleryRepository;
pub use services::ServiceRepository;

/// Embedded schema migrations, applied once at process start.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string, e.g. `sqlite:vitrine.db?mode=rwc`
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be opened.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{MIGRATOR, SqlitePool, SqlitePoolOptions};

    /// Fresh in-memory database with the full schema applied.
    ///
    /// Capped at one connection: every `sqlite::memory:` connection is
    /// its own database.
    pub(crate) async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        MIGRATOR.run(&pool).await.expect("migrations");
        pool
    }
}
