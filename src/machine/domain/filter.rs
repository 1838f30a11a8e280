//! Query criteria for listing machines.

use super::Machine;
use std::cmp::Ordering;

/// Conjunctive filter over machine category and active flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineFilter {
    category: Option<String>,
    active: Option<bool>,
}

impl MachineFilter {
    /// Creates a filter that matches every machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts results by active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Returns the category criterion.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the active-flag criterion.
    #[must_use]
    pub const fn active(&self) -> Option<bool> {
        self.active
    }

    /// Returns whether `machine` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, machine: &Machine) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| machine.category() == Some(category))
            && self.active.is_none_or(|active| machine.is_active() == active)
    }
}

/// Listing order: active machines first, then by name, then by id.
///
/// Names compare bytewise, so `"Traktor"` sorts before `"bagger"`. The
/// `machines.name` column uses the `"C"` collation to match.
#[must_use]
pub(crate) fn listing_order(a: &Machine, b: &Machine) -> Ordering {
    b.is_active()
        .cmp(&a.is_active())
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.id().cmp(&b.id()))
}
