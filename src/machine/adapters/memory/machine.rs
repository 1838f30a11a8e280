//! In-memory repository for machine inventory tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use crate::machine::{
    domain::{Machine, MachineFilter, MachineId, NewMachine, listing_order},
    ports::{MachineRepository, MachineRepositoryError, MachineRepositoryResult},
};

/// Thread-safe in-memory machine repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMachineRepository {
    state: Arc<RwLock<InMemoryMachineState>>,
}

#[derive(Debug, Default)]
struct InMemoryMachineState {
    machines: BTreeMap<MachineId, Machine>,
    last_id: i32,
}

impl InMemoryMachineRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> MachineRepositoryError {
    MachineRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MachineRepository for InMemoryMachineRepository {
    async fn insert(&self, machine: &NewMachine) -> MachineRepositoryResult<Machine> {
        let mut state = self.state.write().map_err(poisoned)?;
        let next_id = state.last_id.checked_add(1).ok_or_else(|| {
            MachineRepositoryError::persistence(std::io::Error::other(
                "machine id sequence exhausted",
            ))
        })?;
        state.last_id = next_id;
        let stored = Machine::from_new(MachineId::new(next_id), machine.clone());
        state.machines.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, machine: &Machine) -> MachineRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let slot = state
            .machines
            .get_mut(&machine.id())
            .ok_or(MachineRepositoryError::NotFound(machine.id()))?;
        *slot = machine.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: MachineId) -> MachineRepositoryResult<Option<Machine>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.machines.get(&id).cloned())
    }

    async fn list(&self, filter: &MachineFilter) -> MachineRepositoryResult<Vec<Machine>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut machines: Vec<Machine> = state
            .machines
            .values()
            .filter(|machine| filter.matches(machine))
            .cloned()
            .collect();
        machines.sort_by(listing_order);
        Ok(machines)
    }

    async fn categories(&self) -> MachineRepositoryResult<Vec<String>> {
        let state = self.state.read().map_err(poisoned)?;
        let categories: BTreeSet<String> = state
            .machines
            .values()
            .filter_map(Machine::category)
            .filter(|category| !category.trim().is_empty())
            .map(str::to_owned)
            .collect();
        Ok(categories.into_iter().collect())
    }

    async fn count(&self) -> MachineRepositoryResult<u64> {
        let state = self.state.read().map_err(poisoned)?;
        u64::try_from(state.machines.len()).map_err(MachineRepositoryError::persistence)
    }
}
