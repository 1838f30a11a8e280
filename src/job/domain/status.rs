//! Approval workflow status of a job.

use super::ParseJobStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval status of a submitted job.
///
/// The storage representation keeps the German workflow terms used by the
/// municipality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Reported by a warden and awaiting a decision (`eingereicht`).
    #[default]
    #[serde(rename = "eingereicht")]
    Submitted,
    /// Accepted by an approving user (`freigegeben`).
    #[serde(rename = "freigegeben")]
    Approved,
    /// Declined by an approving user (`abgelehnt`).
    #[serde(rename = "abgelehnt")]
    Rejected,
}

impl JobStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 3] = [Self::Submitted, Self::Approved, Self::Rejected];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "eingereicht",
            Self::Approved => "freigegeben",
            Self::Rejected => "abgelehnt",
        }
    }

    /// Returns whether the workflow permits moving from `self` to `target`.
    ///
    /// Only submitted jobs can be decided; decisions are final.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Submitted, Self::Approved | Self::Rejected)
        )
    }

    /// Returns whether an approving user has already decided the job.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Submitted)
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = ParseJobStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "eingereicht" => Ok(Self::Submitted),
            "freigegeben" => Ok(Self::Approved),
            "abgelehnt" => Ok(Self::Rejected),
            _ => Err(ParseJobStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
