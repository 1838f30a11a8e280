//! Work-hour job reporting for Wegewart.
//!
//! Trail wardens submit jobs (date, village, description, hours); an
//! approving user later approves or rejects them. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
