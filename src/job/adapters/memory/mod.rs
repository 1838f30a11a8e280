//! In-memory adapters for job reporting.

mod job;

pub use job::InMemoryJobRepository;
