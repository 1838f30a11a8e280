//! Validity window of a machine.

use super::MachineDomainError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Closed interval during which a machine may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ValidityWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl ValidityWindow {
    /// Creates a window spanning `from` to `to`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`MachineDomainError::InvalidValidityWindow`] when `to` lies
    /// before `from`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, MachineDomainError> {
        if to < from {
            return Err(MachineDomainError::InvalidValidityWindow { from, to });
        }
        Ok(Self { from, to })
    }

    /// Rebuilds a window from stored bounds without re-validating them.
    ///
    /// The relational schema does not constrain the bounds, so rows written
    /// by other clients may hold an inverted window; such a window contains
    /// no instant.
    #[must_use]
    pub const fn from_stored(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Returns the first instant of the window.
    #[must_use]
    pub const fn starts_at(&self) -> DateTime<Utc> {
        self.from
    }

    /// Returns the last instant of the window.
    #[must_use]
    pub const fn ends_at(&self) -> DateTime<Utc> {
        self.to
    }

    /// Returns whether `instant` lies inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}
