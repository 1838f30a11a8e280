//! Service layer for submitting, revising and deciding job reports.

use crate::job::{
    domain::{Job, JobDomainError, JobFilter, JobId, JobRevision, JobStatus, NewJob, UserId},
    ports::{JobRepository, JobRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for reporting a day of work.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitJobRequest {
    wegewart_id: UserId,
    date: NaiveDate,
    village: String,
    description: String,
    hours: f64,
}

impl SubmitJobRequest {
    /// Creates a request with every reported field.
    #[must_use]
    pub fn new(
        wegewart_id: UserId,
        date: NaiveDate,
        village: impl Into<String>,
        description: impl Into<String>,
        hours: f64,
    ) -> Self {
        Self {
            wegewart_id,
            date,
            village: village.into(),
            description: description.into(),
            hours,
        }
    }
}

/// Result of deciding several jobs at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDecisionOutcome {
    /// Jobs that were decided by this call.
    pub decided: Vec<JobId>,
    /// Jobs that were missing or no longer awaiting a decision.
    pub skipped: Vec<JobId>,
}

/// Service-level errors for job reporting operations.
#[derive(Debug, Error)]
pub enum JobReportingError {
    /// Workflow rules rejected the change.
    #[error(transparent)]
    Domain(#[from] JobDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] JobRepositoryError),
    /// A bulk decision was requested without any job.
    #[error("no jobs selected")]
    NoJobsSelected,
}

/// Result type for job reporting service operations.
pub type JobReportingResult<T> = Result<T, JobReportingError>;

/// Job reporting and approval orchestration service.
#[derive(Clone)]
pub struct JobReportingService<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> JobReportingService<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new job reporting service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records a new job in the submitted state.
    ///
    /// # Errors
    ///
    /// Returns [`JobReportingError::Repository`] when the warden is unknown
    /// or persistence fails.
    pub async fn submit(&self, request: SubmitJobRequest) -> JobReportingResult<Job> {
        let new_job = NewJob::new(
            request.wegewart_id,
            request.date,
            request.village,
            request.description,
            request.hours,
            &*self.clock,
        );
        let job = self.repository.insert(&new_job).await?;
        info!(
            job_id = %job.id(),
            wegewart_id = %job.wegewart_id(),
            date = %job.date(),
            "job submitted"
        );
        Ok(job)
    }

    /// Retrieves a job by identifier.
    ///
    /// Returns `Ok(None)` when the job does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`JobReportingError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: JobId) -> JobReportingResult<Option<Job>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists jobs matching `filter`, newest work date first.
    ///
    /// # Errors
    ///
    /// Returns [`JobReportingError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self, filter: &JobFilter) -> JobReportingResult<Vec<Job>> {
        Ok(self.repository.list(filter).await?)
    }

    /// Changes the reported details of a job that is not yet approved.
    ///
    /// # Errors
    ///
    /// Returns [`JobReportingError::Domain`] when the job is approved, or
    /// [`JobReportingError::Repository`] when it does not exist or
    /// persistence fails.
    pub async fn revise(&self, id: JobId, revision: JobRevision) -> JobReportingResult<Job> {
        let mut job = self.load(id).await?;
        job.revise(revision, &*self.clock)?;
        self.repository.update(&job).await?;
        info!(job_id = %id, "job revised");
        Ok(job)
    }

    /// Approves a submitted job.
    ///
    /// # Errors
    ///
    /// Returns [`JobReportingError::Domain`] when the job was already
    /// decided, or [`JobReportingError::Repository`] when the job or the
    /// approver does not exist.
    pub async fn approve(
        &self,
        id: JobId,
        approver: UserId,
        notes: Option<String>,
    ) -> JobReportingResult<Job> {
        let mut job = self.load(id).await?;
        job.approve(approver, notes, &*self.clock)?;
        self.repository.update(&job).await?;
        info!(job_id = %id, approver = %approver, "job approved");
        Ok(job)
    }

    /// Rejects a submitted job, keeping `reason` in the admin notes.
    ///
    /// # Errors
    ///
    /// Returns [`JobReportingError::Domain`] when the job was already
    /// decided, or [`JobReportingError::Repository`] when the job or the
    /// approver does not exist.
    pub async fn reject(
        &self,
        id: JobId,
        approver: UserId,
        reason: Option<String>,
    ) -> JobReportingResult<Job> {
        let mut job = self.load(id).await?;
        job.reject(approver, reason, &*self.clock)?;
        self.repository.update(&job).await?;
        info!(job_id = %id, approver = %approver, "job rejected");
        Ok(job)
    }

    /// Replaces the admin notes of a job in any status.
    ///
    /// # Errors
    ///
    /// Returns [`JobReportingError::Repository`] when the job does not
    /// exist or persistence fails.
    pub async fn annotate(&self, id: JobId, notes: Option<String>) -> JobReportingResult<Job> {
        let mut job = self.load(id).await?;
        job.annotate(notes, &*self.clock);
        self.repository.update(&job).await?;
        Ok(job)
    }

    /// Approves every listed job that is still awaiting a decision.
    ///
    /// The decided jobs are written as one unit: if any write fails, none
    /// of them is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`JobReportingError::NoJobsSelected`] for an empty id list, or
    /// [`JobReportingError::Repository`] when persistence fails or the
    /// approver does not exist.
    pub async fn approve_many(
        &self,
        ids: &[JobId],
        approver: UserId,
    ) -> JobReportingResult<BulkDecisionOutcome> {
        self.decide_many(ids, JobStatus::Approved, approver, None)
            .await
    }

    /// Rejects every listed job that is still awaiting a decision.
    ///
    /// Writes are all-or-nothing, as for [`Self::approve_many`].
    ///
    /// # Errors
    ///
    /// Returns [`JobReportingError::NoJobsSelected`] for an empty id list, or
    /// [`JobReportingError::Repository`] when persistence fails or the
    /// approver does not exist.
    pub async fn reject_many(
        &self,
        ids: &[JobId],
        approver: UserId,
        reason: Option<String>,
    ) -> JobReportingResult<BulkDecisionOutcome> {
        self.decide_many(ids, JobStatus::Rejected, approver, reason)
            .await
    }

    async fn decide_many(
        &self,
        ids: &[JobId],
        target: JobStatus,
        approver: UserId,
        notes: Option<String>,
    ) -> JobReportingResult<BulkDecisionOutcome> {
        if ids.is_empty() {
            return Err(JobReportingError::NoJobsSelected);
        }

        let mut outcome = BulkDecisionOutcome::default();
        let mut decided_jobs = Vec::with_capacity(ids.len());
        for &id in ids {
            let Some(mut job) = self.repository.find_by_id(id).await? else {
                warn!(job_id = %id, "skipping missing job in bulk decision");
                outcome.skipped.push(id);
                continue;
            };
            if !job.status().can_transition_to(target) {
                warn!(job_id = %id, status = %job.status(), "skipping decided job in bulk decision");
                outcome.skipped.push(id);
                continue;
            }

            if target == JobStatus::Approved {
                job.approve(approver, notes.clone(), &*self.clock)?;
            } else {
                job.reject(approver, notes.clone(), &*self.clock)?;
            }
            outcome.decided.push(id);
            decided_jobs.push(job);
        }

        if !decided_jobs.is_empty() {
            self.repository.update_many(&decided_jobs).await?;
        }
        info!(
            status = %target,
            decided = outcome.decided.len(),
            skipped = outcome.skipped.len(),
            "bulk decision applied"
        );
        Ok(outcome)
    }

    async fn load(&self, id: JobId) -> JobReportingResult<Job> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(JobReportingError::Repository(JobRepositoryError::NotFound(id)))
    }
}
