//! Wegewart: persistence for municipal trail-warden work reports.
//!
//! Trail wardens ("Wegewarte") report the hours they worked on paths in
//! their village; an approving user later approves or rejects each report.
//! Alongside the reports the crate keeps an inventory of the machines that
//! may be used for the work.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: `PostgreSQL` (Diesel) and in-memory implementations
//! - **Services**: Orchestration with an injected clock
//!
//! # Modules
//!
//! - [`job`]: Work-hour reports and their approval workflow
//! - [`machine`]: Machine inventory with validity windows and seed data
//! - [`persistence`]: Connection pool and embedded migrations
//! - [`bootstrap`]: Schema creation and default-data initialisation
//! - [`config`]: Layered settings
//! - [`telemetry`]: Tracing subscriber setup

pub mod bootstrap;
pub mod config;
pub mod job;
pub mod machine;
pub mod persistence;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;
