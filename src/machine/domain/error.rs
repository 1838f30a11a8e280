//! Error types for machine domain validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while validating machine data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineDomainError {
    /// The machine name is empty after trimming.
    #[error("machine name must not be empty")]
    EmptyName,

    /// The validity window ends before it starts.
    #[error("validity window ends at {to} before it starts at {from}")]
    InvalidValidityWindow {
        /// Requested start of the window.
        from: DateTime<Utc>,
        /// Requested end of the window.
        to: DateTime<Utc>,
    },

    /// An update request carried no change.
    #[error("update changes nothing")]
    EmptyUpdate,
}
