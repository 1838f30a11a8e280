//! Layered settings for the initialisation routine.
//!
//! Values are read from CLI flags, `WEGEWART_*` environment variables and
//! configuration files through `ortho_config`.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or interpreting settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The layered sources could not be merged.
    #[error("failed to load settings: {0}")]
    Load(String),

    /// No database URL was configured.
    #[error("no database URL configured; set WEGEWART_DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Settings controlling database initialisation.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WEGEWART")]
pub struct WegewartSettings {
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 4)]
    pub max_connections: u32,
    /// Insert the default machines into an empty inventory.
    #[ortho_config(default = true)]
    pub seed_machines: bool,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl WegewartSettings {
    /// Loads settings from the given command line plus environment and
    /// configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be parsed.
    pub fn load_from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args).map_err(|err| ConfigError::Load(err.to_string()))
    }

    /// Returns the configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when the URL is unset or
    /// blank.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}
