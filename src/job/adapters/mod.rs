//! Adapter implementations for job persistence.

pub mod memory;
pub mod postgres;
