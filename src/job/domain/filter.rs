//! Query criteria for listing jobs.

use super::{Job, JobStatus, UserId};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Conjunctive filter over the indexed job columns.
///
/// Unset criteria match every job. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    wegewart_id: Option<UserId>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    village: Option<String>,
    status: Option<JobStatus>,
    approved: Option<bool>,
}

impl JobFilter {
    /// Creates a filter that matches every job.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one warden.
    #[must_use]
    pub const fn with_wegewart(mut self, wegewart_id: UserId) -> Self {
        self.wegewart_id = Some(wegewart_id);
        self
    }

    /// Restricts results to jobs on or after `date`.
    #[must_use]
    pub const fn with_date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    /// Restricts results to jobs on or before `date`.
    #[must_use]
    pub const fn with_date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Restricts results to a single day.
    #[must_use]
    pub const fn on_date(self, date: NaiveDate) -> Self {
        self.with_date_from(date).with_date_to(date)
    }

    /// Restricts results to one village.
    #[must_use]
    pub fn with_village(mut self, village: impl Into<String>) -> Self {
        self.village = Some(village.into());
        self
    }

    /// Restricts results to one workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results by approval flag.
    #[must_use]
    pub const fn with_approved(mut self, approved: bool) -> Self {
        self.approved = Some(approved);
        self
    }

    /// Returns the warden criterion.
    #[must_use]
    pub const fn wegewart_id(&self) -> Option<UserId> {
        self.wegewart_id
    }

    /// Returns the inclusive lower date bound.
    #[must_use]
    pub const fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    /// Returns the inclusive upper date bound.
    #[must_use]
    pub const fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    /// Returns the village criterion.
    #[must_use]
    pub fn village(&self) -> Option<&str> {
        self.village.as_deref()
    }

    /// Returns the status criterion.
    #[must_use]
    pub const fn status(&self) -> Option<JobStatus> {
        self.status
    }

    /// Returns the approval criterion.
    #[must_use]
    pub const fn approved(&self) -> Option<bool> {
        self.approved
    }

    /// Returns whether `job` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, job: &Job) -> bool {
        self.wegewart_id.is_none_or(|id| job.wegewart_id() == id)
            && self.date_from.is_none_or(|from| job.date() >= from)
            && self.date_to.is_none_or(|to| job.date() <= to)
            && self.village.as_deref().is_none_or(|v| job.village() == v)
            && self.status.is_none_or(|s| job.status() == s)
            && self.approved.is_none_or(|a| job.approved() == a)
    }
}

/// Listing order: newest work date first, then newest record, then id.
#[must_use]
pub(crate) fn listing_order(a: &Job, b: &Job) -> Ordering {
    b.date()
        .cmp(&a.date())
        .then_with(|| b.created_at().cmp(&a.created_at()))
        .then_with(|| b.id().cmp(&a.id()))
}
