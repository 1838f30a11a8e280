//! Shared `PostgreSQL` infrastructure: connection pooling and embedded
//! schema migrations.
//!
//! The repositories in [`crate::job`] and [`crate::machine`] run synchronous
//! Diesel calls on blocking worker threads, so the pool is a plain r2d2
//! pool rather than an async one.

mod migrations;
mod pool;

pub use migrations::{MIGRATIONS, run_migrations};
pub use pool::{PgPool, build_pool};

use thiserror::Error;

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A pool needs room for at least one connection.
    #[error("connection pool size must be at least 1")]
    EmptyPool,

    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// Applying the embedded migrations failed.
    #[error("migration failed: {0}")]
    Migration(String),
}
