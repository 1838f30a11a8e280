//! Database initialisation: pool, schema migrations and default machines.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, WegewartSettings};
use crate::machine::{
    adapters::postgres::PostgresMachineRepository,
    services::{MachineInventoryError, MachineInventoryService, SeedOutcome},
};
use crate::persistence::{PersistenceError, PgPool, build_pool, run_migrations};

/// Errors raised while initialising the database.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Settings were incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Pool construction or migrations failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Seeding the default machines failed.
    #[error(transparent)]
    Seed(#[from] MachineInventoryError),

    /// The blocking setup task panicked or was cancelled.
    #[error("database setup task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Outcome of [`initialise`].
#[derive(Debug)]
pub struct InitReport {
    /// Pool connected to the initialised database.
    pub pool: PgPool,
    /// Versions of the migrations applied by this run.
    pub applied_migrations: Vec<String>,
    /// Seeding result, or `None` when seeding is disabled.
    pub seed: Option<SeedOutcome>,
}

/// Connects to the configured database, applies pending migrations and,
/// when enabled, seeds the default machines.
///
/// Safe to run repeatedly: migrations and seeding skip work that was
/// already done.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the database URL is missing, the
/// database is unreachable, a migration fails, or seeding fails.
pub async fn initialise<C>(
    settings: &WegewartSettings,
    clock: Arc<C>,
) -> Result<InitReport, BootstrapError>
where
    C: Clock + Send + Sync,
{
    let database_url = settings.require_database_url()?.to_owned();
    let max_connections = settings.max_connections;

    let (pool, applied_migrations) = tokio::task::spawn_blocking(move || {
        let pool = build_pool(&database_url, max_connections)?;
        let mut connection = pool.get()?;
        let applied = run_migrations(&mut connection)?;
        Ok::<_, PersistenceError>((pool, applied))
    })
    .await??;

    let seed = if settings.seed_machines {
        let repository = Arc::new(PostgresMachineRepository::new(pool.clone()));
        let service = MachineInventoryService::new(repository, clock);
        Some(service.seed_defaults().await?)
    } else {
        None
    };

    info!(
        applied_migrations = applied_migrations.len(),
        seeded = matches!(seed, Some(SeedOutcome::Seeded(_))),
        "database initialised"
    );
    Ok(InitReport {
        pool,
        applied_migrations,
        seed,
    })
}
