//! Embedded SQL migrations, applied once at startup.
//!
//! Migrations run on a dedicated synchronous connection inside
//! `spawn_blocking`; the async pool is only built afterwards, so every
//! pooled connection sees the final schema.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// All SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying startup migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be established.
    #[error("failed to connect for migrations: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Execution {
        /// Underlying failure description.
        message: String,
    },
}

/// Apply every pending migration against the given database.
///
/// # Errors
///
/// Returns [`MigrationError::Connection`] when the database is unreachable
/// and [`MigrationError::Execution`] when a migration fails; both abort
/// startup.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn =
            PgConnection::establish(&url).map_err(|error| MigrationError::Connection {
                message: error.to_string(),
            })?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|error| MigrationError::Execution {
                message: error.to_string(),
            })?;
        info!(count = applied.len(), "database migrations applied");
        Ok(())
    })
    .await
    .map_err(|error| MigrationError::Execution {
        message: format!("migration task panicked: {error}"),
    })?
}
