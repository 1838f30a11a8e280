//! Machine inventory for Wegewart.
//!
//! Machines are the equipment wardens can report against. They are never
//! deleted; retiring a machine clears its active flag instead. Each machine
//! carries a validity window bounding when it may be used.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
