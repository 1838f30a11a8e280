//! Repository port for job persistence and lookup.

use crate::job::domain::{Job, JobFilter, JobId, NewJob, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job repository operations.
pub type JobRepositoryResult<T> = Result<T, JobRepositoryError>;

/// Job persistence contract.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Stores a new job and returns it under its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::UnknownUser`] when the reporting warden
    /// does not exist in the user table.
    async fn insert(&self, job: &NewJob) -> JobRepositoryResult<Job>;

    /// Persists changes to an existing job (details, decision, notes,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::NotFound`] when the job does not exist
    /// or [`JobRepositoryError::UnknownUser`] when a referenced user is
    /// missing.
    async fn update(&self, job: &Job) -> JobRepositoryResult<()>;

    /// Persists changes to several jobs as one unit.
    ///
    /// Either every job is written or, on error, none is.
    ///
    /// # Errors
    ///
    /// Returns the first [`JobRepositoryError::NotFound`] or
    /// [`JobRepositoryError::UnknownUser`] encountered; earlier writes of the
    /// batch are rolled back.
    async fn update_many(&self, jobs: &[Job]) -> JobRepositoryResult<()>;

    /// Finds a job by identifier.
    ///
    /// Returns `None` when the job does not exist.
    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>>;

    /// Returns every job matching `filter`, newest work date first.
    async fn list(&self, filter: &JobFilter) -> JobRepositoryResult<Vec<Job>>;
}

/// Errors returned by job repository implementations.
#[derive(Debug, Clone, Error)]
pub enum JobRepositoryError {
    /// A referenced user does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for JobRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
