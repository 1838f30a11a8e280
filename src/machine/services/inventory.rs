//! Service layer for registering, updating and seeding machines.

use crate::machine::{
    domain::{
        Machine, MachineDomainError, MachineFilter, MachineId, MachineName, MachineUpdate,
        NewMachine, ValidityWindow, default_machines,
    },
    ports::{MachineRepository, MachineRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for registering a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMachineRequest {
    name: String,
    category: Option<String>,
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
    active: bool,
}

impl RegisterMachineRequest {
    /// Creates a request for an active machine without category.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            category: None,
            valid_from,
            valid_to,
            active: true,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the initial active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// Request payload for a partial machine update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMachineRequest {
    name: Option<String>,
    category: Option<Option<String>>,
    validity: Option<(DateTime<Utc>, DateTime<Utc>)>,
    active: Option<bool>,
}

impl UpdateMachineRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the category; `None` clears it.
    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }

    /// Replaces both bounds of the validity window.
    #[must_use]
    pub const fn with_validity(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.validity = Some((from, to));
        self
    }

    /// Replaces the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    fn into_update(self) -> Result<MachineUpdate, MachineDomainError> {
        let mut update = MachineUpdate::new();
        if let Some(name) = self.name {
            update = update.with_name(MachineName::new(name)?);
        }
        if let Some(category) = self.category {
            update = update.with_category(category);
        }
        if let Some((from, to)) = self.validity {
            update = update.with_validity(ValidityWindow::new(from, to)?);
        }
        if let Some(active) = self.active {
            update = update.with_active(active);
        }
        Ok(update)
    }
}

/// Result of seeding the default machines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The inventory was empty and the default machines were inserted.
    Seeded(Vec<Machine>),
    /// The inventory already held machines; nothing was inserted.
    AlreadySeeded {
        /// Number of machines found.
        existing: u64,
    },
}

/// Service-level errors for machine inventory operations.
#[derive(Debug, Error)]
pub enum MachineInventoryError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] MachineDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MachineRepositoryError),
}

/// Result type for machine inventory service operations.
pub type MachineInventoryResult<T> = Result<T, MachineInventoryError>;

/// Machine inventory orchestration service.
#[derive(Clone)]
pub struct MachineInventoryService<R, C>
where
    R: MachineRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> MachineInventoryService<R, C>
where
    R: MachineRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new machine inventory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new machine.
    ///
    /// # Errors
    ///
    /// Returns [`MachineInventoryError::Domain`] when the name is blank or
    /// the validity window is inverted, or
    /// [`MachineInventoryError::Repository`] when persistence fails.
    pub async fn register(&self, request: RegisterMachineRequest) -> MachineInventoryResult<Machine> {
        let name = MachineName::new(request.name)?;
        let validity = ValidityWindow::new(request.valid_from, request.valid_to)?;
        let new_machine = NewMachine::new(name, request.category, validity, &*self.clock)
            .with_active(request.active);

        let machine = self.repository.insert(&new_machine).await?;
        info!(machine_id = %machine.id(), name = %machine.name(), "machine registered");
        Ok(machine)
    }

    /// Retrieves a machine by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MachineInventoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: MachineId) -> MachineInventoryResult<Option<Machine>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists machines matching `filter`, active machines first.
    ///
    /// # Errors
    ///
    /// Returns [`MachineInventoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self, filter: &MachineFilter) -> MachineInventoryResult<Vec<Machine>> {
        Ok(self.repository.list(filter).await?)
    }

    /// Lists active machines whose validity window contains the current
    /// instant.
    ///
    /// # Errors
    ///
    /// Returns [`MachineInventoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_available(&self) -> MachineInventoryResult<Vec<Machine>> {
        let now = self.clock.utc();
        let active = self
            .repository
            .list(&MachineFilter::new().with_active(true))
            .await?;
        Ok(active
            .into_iter()
            .filter(|machine| machine.is_available_at(now))
            .collect())
    }

    /// Returns the distinct non-empty categories in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`MachineInventoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn categories(&self) -> MachineInventoryResult<Vec<String>> {
        Ok(self.repository.categories().await?)
    }

    /// Applies a partial update to a machine.
    ///
    /// # Errors
    ///
    /// Returns [`MachineInventoryError::Domain`] when the request changes
    /// nothing or the new values are invalid, or [`MachineInventoryError::Repository`] when the machine
    /// does not exist or persistence fails.
    pub async fn update(
        &self,
        id: MachineId,
        request: UpdateMachineRequest,
    ) -> MachineInventoryResult<Machine> {
        let update = request.into_update()?;
        if update.is_empty() {
            return Err(MachineDomainError::EmptyUpdate.into());
        }
        let mut machine = self.load(id).await?;
        machine.apply(update);
        self.repository.update(&machine).await?;
        info!(machine_id = %id, "machine updated");
        Ok(machine)
    }

    /// Marks a machine as active.
    ///
    /// # Errors
    ///
    /// Returns [`MachineInventoryError::Repository`] when the machine does
    /// not exist or persistence fails.
    pub async fn activate(&self, id: MachineId) -> MachineInventoryResult<Machine> {
        let mut machine = self.load(id).await?;
        machine.activate();
        self.repository.update(&machine).await?;
        info!(machine_id = %id, "machine activated");
        Ok(machine)
    }

    /// Retires a machine by clearing its active flag.
    ///
    /// # Errors
    ///
    /// Returns [`MachineInventoryError::Repository`] when the machine does
    /// not exist or persistence fails.
    pub async fn deactivate(&self, id: MachineId) -> MachineInventoryResult<Machine> {
        let mut machine = self.load(id).await?;
        machine.deactivate();
        self.repository.update(&machine).await?;
        info!(machine_id = %id, "machine deactivated");
        Ok(machine)
    }

    /// Inserts the default machines when the inventory is empty.
    ///
    /// # Errors
    ///
    /// Returns [`MachineInventoryError::Repository`] when persistence fails.
    pub async fn seed_defaults(&self) -> MachineInventoryResult<SeedOutcome> {
        let existing = self.repository.count().await?;
        if existing > 0 {
            debug!(existing, "machine inventory already populated, skipping seed");
            return Ok(SeedOutcome::AlreadySeeded { existing });
        }

        let mut seeded = Vec::new();
        for new_machine in default_machines(&*self.clock)? {
            seeded.push(self.repository.insert(&new_machine).await?);
        }
        info!(count = seeded.len(), "default machines seeded");
        Ok(SeedOutcome::Seeded(seeded))
    }

    async fn load(&self, id: MachineId) -> MachineInventoryResult<Machine> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(MachineInventoryError::Repository(
                MachineRepositoryError::NotFound(id),
            ))
    }
}
