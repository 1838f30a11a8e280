//! In-memory adapters for the machine inventory.

mod machine;

pub use machine::InMemoryMachineRepository;
