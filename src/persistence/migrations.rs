//! Embedded Diesel migrations for the `jobs` and `machines` tables.

use super::PersistenceError;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled into the crate from the `migrations` directory.
///
/// The `jobs` foreign keys expect a `users` table to exist before these
/// run.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies every pending migration and returns the applied versions.
///
/// Already applied migrations are skipped, so the call is idempotent.
///
/// # Errors
///
/// Returns [`PersistenceError::Migration`] when a migration fails.
pub fn run_migrations(connection: &mut PgConnection) -> Result<Vec<String>, PersistenceError> {
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| PersistenceError::Migration(err.to_string()))?;
    let versions: Vec<String> = applied.iter().map(ToString::to_string).collect();
    info!(applied = versions.len(), "database migrations complete");
    Ok(versions)
}
