//! Diesel row models for job persistence.

use super::schema::jobs;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for job records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobRow {
    /// Auto-assigned job identifier.
    pub id: i32,
    /// Reporting warden.
    pub wegewart_id: i32,
    /// Day the work was done.
    pub date: NaiveDate,
    /// Village the work was done in.
    pub village: String,
    /// Work description.
    pub description: String,
    /// Reported hours.
    pub hours: f64,
    /// Workflow status.
    pub status: String,
    /// Approval flag.
    pub approved: bool,
    /// Deciding user.
    pub approved_by: Option<i32>,
    /// Decision timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Remarks from the approving side.
    pub admin_notes: Option<String>,
}

/// Insert model for job records.
///
/// `status` and `approved` are written explicitly rather than left to the
/// column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub struct NewJobRow {
    /// Reporting warden.
    pub wegewart_id: i32,
    /// Day the work was done.
    pub date: NaiveDate,
    /// Village the work was done in.
    pub village: String,
    /// Work description.
    pub description: String,
    /// Reported hours.
    pub hours: f64,
    /// Workflow status.
    pub status: String,
    /// Approval flag.
    pub approved: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full-row changeset written on every job update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
#[diesel(treat_none_as_null = true)]
pub struct JobChangeset {
    /// Day the work was done.
    pub date: NaiveDate,
    /// Village the work was done in.
    pub village: String,
    /// Work description.
    pub description: String,
    /// Reported hours.
    pub hours: f64,
    /// Workflow status.
    pub status: String,
    /// Approval flag.
    pub approved: bool,
    /// Deciding user.
    pub approved_by: Option<i32>,
    /// Decision timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Remarks from the approving side.
    pub admin_notes: Option<String>,
}
