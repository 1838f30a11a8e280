//! Domain model for work-hour job reporting.
//!
//! Jobs carry their approval workflow state as a closed [`JobStatus`] enum.
//! Persistence concerns such as identifier assignment and referential
//! integrity against the external user table stay outside this boundary.

mod error;
mod filter;
mod ids;
mod job;
mod status;

pub use error::{JobDomainError, ParseJobStatusError};
pub use filter::JobFilter;
pub(crate) use filter::listing_order;
pub use ids::{JobId, UserId};
pub use job::{Job, JobRevision, NewJob, PersistedJobData};
pub use status::JobStatus;
