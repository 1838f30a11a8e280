//! Error types for job domain validation and parsing.

use super::{JobId, JobStatus};
use thiserror::Error;

/// Errors returned while mutating job aggregates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobDomainError {
    /// The requested status change is not part of the approval workflow.
    #[error("job {job_id} cannot move from '{from}' to '{to}'")]
    InvalidStatusTransition {
        /// Job being transitioned.
        job_id: JobId,
        /// Status held before the attempted transition.
        from: JobStatus,
        /// Status that was requested.
        to: JobStatus,
    },

    /// Approved jobs no longer accept changes to their reported details.
    #[error("job {0} is approved and can no longer be revised")]
    ApprovedJobLocked(JobId),
}

/// Error returned while parsing job statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseJobStatusError(pub String);
