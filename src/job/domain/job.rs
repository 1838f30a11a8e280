//! Job aggregate root and its approval workflow.

use super::{JobDomainError, JobId, JobStatus, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A work-hour report that has not been persisted yet.
///
/// The store assigns the identifier on insert; everything else, including
/// both timestamps, is fixed here from the injected clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    wegewart_id: UserId,
    date: NaiveDate,
    village: String,
    description: String,
    hours: f64,
    created_at: DateTime<Utc>,
}

impl NewJob {
    /// Creates a submission for the given warden.
    #[must_use]
    pub fn new(
        wegewart_id: UserId,
        date: NaiveDate,
        village: impl Into<String>,
        description: impl Into<String>,
        hours: f64,
        clock: &impl Clock,
    ) -> Self {
        Self {
            wegewart_id,
            date,
            village: village.into(),
            description: description.into(),
            hours,
            created_at: clock.utc(),
        }
    }

    /// Returns the reporting warden.
    #[must_use]
    pub const fn wegewart_id(&self) -> UserId {
        self.wegewart_id
    }

    /// Returns the day the work was done.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the village the work was done in.
    #[must_use]
    pub fn village(&self) -> &str {
        &self.village
    }

    /// Returns the work description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the reported hours.
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.hours
    }

    /// Returns the status every new job starts in.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        JobStatus::Submitted
    }

    /// Returns the creation timestamp, which doubles as the first
    /// `updated_at` value.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Partial change to the reported details of a job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobRevision {
    date: Option<NaiveDate>,
    village: Option<String>,
    description: Option<String>,
    hours: Option<f64>,
}

impl JobRevision {
    /// Creates an empty revision.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the work date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Replaces the village.
    #[must_use]
    pub fn with_village(mut self, village: impl Into<String>) -> Self {
        self.village = Some(village.into());
        self
    }

    /// Replaces the work description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the reported hours.
    #[must_use]
    pub const fn with_hours(mut self, hours: f64) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Returns whether the revision changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.village.is_none()
            && self.description.is_none()
            && self.hours.is_none()
    }
}

/// Job aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    wegewart_id: UserId,
    date: NaiveDate,
    village: String,
    description: String,
    hours: f64,
    status: JobStatus,
    approved: bool,
    approved_by: Option<UserId>,
    approved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    admin_notes: Option<String>,
}

/// Parameter object for reconstructing a persisted job aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedJobData {
    /// Persisted job identifier.
    pub id: JobId,
    /// Reporting warden.
    pub wegewart_id: UserId,
    /// Day the work was done.
    pub date: NaiveDate,
    /// Village the work was done in.
    pub village: String,
    /// Work description.
    pub description: String,
    /// Reported hours.
    pub hours: f64,
    /// Workflow status.
    pub status: JobStatus,
    /// Approval flag.
    pub approved: bool,
    /// Deciding user, if decided.
    pub approved_by: Option<UserId>,
    /// Decision timestamp, if decided.
    pub approved_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Free-text remarks from the approving side.
    pub admin_notes: Option<String>,
}

impl Job {
    /// Materializes a freshly inserted job under its assigned identifier.
    #[must_use]
    pub fn from_new(id: JobId, new_job: NewJob) -> Self {
        let NewJob {
            wegewart_id,
            date,
            village,
            description,
            hours,
            created_at,
        } = new_job;

        Self {
            id,
            wegewart_id,
            date,
            village,
            description,
            hours,
            status: JobStatus::Submitted,
            approved: false,
            approved_by: None,
            approved_at: None,
            created_at,
            updated_at: created_at,
            admin_notes: None,
        }
    }

    /// Reconstructs a job from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedJobData) -> Self {
        Self {
            id: data.id,
            wegewart_id: data.wegewart_id,
            date: data.date,
            village: data.village,
            description: data.description,
            hours: data.hours,
            status: data.status,
            approved: data.approved,
            approved_by: data.approved_by,
            approved_at: data.approved_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
            admin_notes: data.admin_notes,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the reporting warden.
    #[must_use]
    pub const fn wegewart_id(&self) -> UserId {
        self.wegewart_id
    }

    /// Returns the day the work was done.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the village the work was done in.
    #[must_use]
    pub fn village(&self) -> &str {
        &self.village
    }

    /// Returns the work description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the reported hours.
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.hours
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the approval flag.
    #[must_use]
    pub const fn approved(&self) -> bool {
        self.approved
    }

    /// Returns the user who decided the job, if any.
    #[must_use]
    pub const fn approved_by(&self) -> Option<UserId> {
        self.approved_by
    }

    /// Returns when the job was decided, if it was.
    #[must_use]
    pub const fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the remarks left by the approving side.
    #[must_use]
    pub fn admin_notes(&self) -> Option<&str> {
        self.admin_notes.as_deref()
    }

    /// Approves a submitted job on behalf of `approver`.
    ///
    /// `notes`, when given, replaces the current admin notes.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidStatusTransition`] unless the job is
    /// still [`JobStatus::Submitted`].
    pub fn approve(
        &mut self,
        approver: UserId,
        notes: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        self.decide(JobStatus::Approved, approver, notes, clock)
    }

    /// Rejects a submitted job on behalf of `approver`.
    ///
    /// The decider and decision time are recorded in `approved_by` and
    /// `approved_at`; the reason is kept in the admin notes.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidStatusTransition`] unless the job is
    /// still [`JobStatus::Submitted`].
    pub fn reject(
        &mut self,
        approver: UserId,
        reason: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        self.decide(JobStatus::Rejected, approver, reason, clock)
    }

    /// Applies a revision of the reported details.
    ///
    /// An empty revision leaves the job untouched.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::ApprovedJobLocked`] when the job has
    /// already been approved.
    pub fn revise(&mut self, revision: JobRevision, clock: &impl Clock) -> Result<(), JobDomainError> {
        if self.status == JobStatus::Approved {
            return Err(JobDomainError::ApprovedJobLocked(self.id));
        }
        if revision.is_empty() {
            return Ok(());
        }

        let JobRevision {
            date,
            village,
            description,
            hours,
        } = revision;
        if let Some(new_date) = date {
            self.date = new_date;
        }
        if let Some(new_village) = village {
            self.village = new_village;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_hours) = hours {
            self.hours = new_hours;
        }
        self.touch(clock);
        Ok(())
    }

    /// Replaces the admin notes regardless of status.
    pub fn annotate(&mut self, notes: Option<String>, clock: &impl Clock) {
        self.admin_notes = notes;
        self.touch(clock);
    }

    fn decide(
        &mut self,
        target: JobStatus,
        approver: UserId,
        notes: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(JobDomainError::InvalidStatusTransition {
                job_id: self.id,
                from: self.status,
                to: target,
            });
        }

        let decided_at = clock.utc();
        self.status = target;
        self.approved = target == JobStatus::Approved;
        self.approved_by = Some(approver);
        self.approved_at = Some(decided_at);
        if notes.is_some() {
            self.admin_notes = notes;
        }
        self.updated_at = decided_at;
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
