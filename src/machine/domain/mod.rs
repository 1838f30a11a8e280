//! Domain model for the machine inventory.

mod error;
mod filter;
mod ids;
mod machine;
mod name;
mod seed;
mod validity;

pub use error::MachineDomainError;
pub use filter::MachineFilter;
pub(crate) use filter::listing_order;
pub use ids::MachineId;
pub use machine::{Machine, MachineUpdate, NewMachine, PersistedMachineData, normalize_category};
pub use name::MachineName;
pub use seed::{DEFAULT_MACHINES, default_machines, default_validity};
pub use validity::ValidityWindow;
