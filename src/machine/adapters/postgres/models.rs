//! Diesel row models for machine persistence.

use super::schema::machines;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for machine records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = machines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MachineRow {
    /// Auto-assigned machine identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Optional grouping category.
    pub category: Option<String>,
    /// Start of the validity window.
    pub valid_from_datetime: DateTime<Utc>,
    /// End of the validity window.
    pub valid_to_datetime: DateTime<Utc>,
    /// Active flag (0 or 1).
    pub aktiv: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for machine records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = machines)]
pub struct NewMachineRow {
    /// Display name.
    pub name: String,
    /// Optional grouping category.
    pub category: Option<String>,
    /// Start of the validity window.
    pub valid_from_datetime: DateTime<Utc>,
    /// End of the validity window.
    pub valid_to_datetime: DateTime<Utc>,
    /// Active flag (0 or 1).
    pub aktiv: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset written on every machine update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = machines)]
#[diesel(treat_none_as_null = true)]
pub struct MachineChangeset {
    /// Display name.
    pub name: String,
    /// Optional grouping category.
    pub category: Option<String>,
    /// Start of the validity window.
    pub valid_from_datetime: DateTime<Utc>,
    /// End of the validity window.
    pub valid_to_datetime: DateTime<Utc>,
    /// Active flag (0 or 1).
    pub aktiv: i32,
}
