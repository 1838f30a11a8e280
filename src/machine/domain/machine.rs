//! Machine aggregate root.

use super::{MachineId, MachineName, ValidityWindow};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Trims a category and maps blank input to `None`.
#[must_use]
pub fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// A machine that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMachine {
    name: MachineName,
    category: Option<String>,
    validity: ValidityWindow,
    active: bool,
    created_at: DateTime<Utc>,
}

impl NewMachine {
    /// Creates an active machine.
    ///
    /// A blank category is stored as no category.
    #[must_use]
    pub fn new(
        name: MachineName,
        category: Option<String>,
        validity: ValidityWindow,
        clock: &impl Clock,
    ) -> Self {
        Self {
            name,
            category: normalize_category(category),
            validity,
            active: true,
            created_at: clock.utc(),
        }
    }

    /// Sets the initial active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the machine name.
    #[must_use]
    pub const fn name(&self) -> &MachineName {
        &self.name
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the validity window.
    #[must_use]
    pub const fn validity(&self) -> ValidityWindow {
        self.validity
    }

    /// Returns the initial active flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Partial change to a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineUpdate {
    name: Option<MachineName>,
    category: Option<Option<String>>,
    validity: Option<ValidityWindow>,
    active: Option<bool>,
}

impl MachineUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: MachineName) -> Self {
        self.name = Some(name);
        self
    }

    /// Replaces the category; `None` or blank input clears it.
    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = Some(normalize_category(category));
        self
    }

    /// Replaces the validity window.
    #[must_use]
    pub const fn with_validity(mut self, validity: ValidityWindow) -> Self {
        self.validity = Some(validity);
        self
    }

    /// Replaces the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Returns whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.validity.is_none()
            && self.active.is_none()
    }
}

/// Machine aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Machine {
    id: MachineId,
    name: MachineName,
    category: Option<String>,
    validity: ValidityWindow,
    active: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMachineData {
    /// Persisted machine identifier.
    pub id: MachineId,
    /// Machine name.
    pub name: MachineName,
    /// Category, if any.
    pub category: Option<String>,
    /// Validity window.
    pub validity: ValidityWindow,
    /// Active flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Machine {
    /// Materializes a freshly inserted machine under its assigned identifier.
    #[must_use]
    pub fn from_new(id: MachineId, new_machine: NewMachine) -> Self {
        let NewMachine {
            name,
            category,
            validity,
            active,
            created_at,
        } = new_machine;

        Self {
            id,
            name,
            category,
            validity,
            active,
            created_at,
        }
    }

    /// Reconstructs a machine from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMachineData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            category: data.category,
            validity: data.validity,
            active: data.active,
            created_at: data.created_at,
        }
    }

    /// Returns the machine identifier.
    #[must_use]
    pub const fn id(&self) -> MachineId {
        self.id
    }

    /// Returns the machine name.
    #[must_use]
    pub const fn name(&self) -> &MachineName {
        &self.name
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the validity window.
    #[must_use]
    pub const fn validity(&self) -> ValidityWindow {
        self.validity
    }

    /// Returns whether the machine is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the machine can be used at `instant`.
    #[must_use]
    pub fn is_available_at(&self, instant: DateTime<Utc>) -> bool {
        self.active && self.validity.contains(instant)
    }

    /// Applies a partial update.
    pub fn apply(&mut self, update: MachineUpdate) {
        let MachineUpdate {
            name,
            category,
            validity,
            active,
        } = update;
        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_category) = category {
            self.category = new_category;
        }
        if let Some(new_validity) = validity {
            self.validity = new_validity;
        }
        if let Some(new_active) = active {
            self.active = new_active;
        }
    }

    /// Marks the machine as usable.
    pub const fn activate(&mut self) {
        self.active = true;
    }

    /// Retires the machine without deleting it.
    pub const fn deactivate(&mut self) {
        self.active = false;
    }
}
