//! Creates the Wegewart schema and seeds the default machines.
//!
//! Usage:
//!
//! ```text
//! WEGEWART_DATABASE_URL=postgres://user@host/db wegewart-init
//! ```
//!
//! Settings are layered from CLI flags, `WEGEWART_*` environment variables
//! and configuration files. Running the command again is harmless.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{error, info, warn};
use wegewart::bootstrap::initialise;
use wegewart::config::WegewartSettings;
use wegewart::machine::services::SeedOutcome;
use wegewart::telemetry::init_tracing;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let settings = WegewartSettings::load_from_args(std::env::args_os())?;
    if !init_tracing(settings.json_logs) {
        warn!("tracing subscriber already installed");
    }

    let report = initialise(&settings, Arc::new(DefaultClock))
        .await
        .inspect_err(|err| error!(error = %err, "initialisation failed"))?;

    for version in &report.applied_migrations {
        info!(%version, "applied migration");
    }
    match report.seed {
        Some(SeedOutcome::Seeded(machines)) => {
            for machine in &machines {
                info!(machine_id = %machine.id(), name = %machine.name(), "seeded machine");
            }
        }
        Some(SeedOutcome::AlreadySeeded { existing }) => {
            info!(existing, "machines already present, seeding skipped");
        }
        None => info!("machine seeding disabled"),
    }
    Ok(())
}
