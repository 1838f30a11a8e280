//! Port contracts for the machine inventory.

pub mod repository;

pub use repository::{MachineRepository, MachineRepositoryError, MachineRepositoryResult};
