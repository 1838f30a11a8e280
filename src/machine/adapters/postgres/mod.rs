//! `PostgreSQL` adapters for the machine inventory.

mod models;
mod repository;
mod schema;

pub use repository::PostgresMachineRepository;
