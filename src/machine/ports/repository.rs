//! Repository port for machine persistence and lookup.

use crate::machine::domain::{Machine, MachineFilter, MachineId, NewMachine};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for machine repository operations.
pub type MachineRepositoryResult<T> = Result<T, MachineRepositoryError>;

/// Machine persistence contract.
///
/// There is deliberately no delete operation; machines are retired by
/// clearing their active flag.
#[async_trait]
pub trait MachineRepository: Send + Sync {
    /// Stores a new machine and returns it under its assigned identifier.
    async fn insert(&self, machine: &NewMachine) -> MachineRepositoryResult<Machine>;

    /// Persists changes to an existing machine.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRepositoryError::NotFound`] when the machine does not
    /// exist.
    async fn update(&self, machine: &Machine) -> MachineRepositoryResult<()>;

    /// Finds a machine by identifier.
    async fn find_by_id(&self, id: MachineId) -> MachineRepositoryResult<Option<Machine>>;

    /// Returns every machine matching `filter`, active machines first and
    /// then by name.
    async fn list(&self, filter: &MachineFilter) -> MachineRepositoryResult<Vec<Machine>>;

    /// Returns the distinct non-empty categories in ascending order.
    async fn categories(&self) -> MachineRepositoryResult<Vec<String>>;

    /// Returns the number of stored machines, active or not.
    async fn count(&self) -> MachineRepositoryResult<u64>;
}

/// Errors returned by machine repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MachineRepositoryError {
    /// The machine was not found.
    #[error("machine not found: {0}")]
    NotFound(MachineId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MachineRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
