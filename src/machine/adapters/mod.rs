//! Adapter implementations for machine inventory ports.

pub mod memory;
pub mod postgres;
