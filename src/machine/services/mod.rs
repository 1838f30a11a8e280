//! Application services for the machine inventory.

mod inventory;

pub use inventory::{
    MachineInventoryError, MachineInventoryResult, MachineInventoryService,
    RegisterMachineRequest, SeedOutcome, UpdateMachineRequest,
};
