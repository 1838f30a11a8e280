//! Default machine set for a fresh installation.

use super::{MachineDomainError, MachineName, NewMachine, ValidityWindow};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Name and category of every default machine.
pub const DEFAULT_MACHINES: [(&str, &str); 3] = [
    ("Traktor", "Fahrzeug"),
    ("Anhänger", "Anhänger"),
    ("Mähwerk", "Anbaugerät"),
];

/// 2000-01-01T00:00:00Z as a Unix timestamp.
const DEFAULT_VALID_FROM: i64 = 946_684_800;
/// 2099-12-31T23:59:59Z as a Unix timestamp.
const DEFAULT_VALID_TO: i64 = 4_102_444_799;

/// Returns the window assigned to default machines, from the start of 2000
/// to the end of 2099.
///
/// # Errors
///
/// Returns [`MachineDomainError::InvalidValidityWindow`] if the bounds are
/// inverted.
pub fn default_validity() -> Result<ValidityWindow, MachineDomainError> {
    let from = DateTime::from_timestamp(DEFAULT_VALID_FROM, 0).unwrap_or(DateTime::<Utc>::MIN_UTC);
    let to = DateTime::from_timestamp(DEFAULT_VALID_TO, 0).unwrap_or(DateTime::<Utc>::MAX_UTC);
    ValidityWindow::new(from, to)
}

/// Builds the default machines, all active, stamped with `clock`.
///
/// # Errors
///
/// Returns [`MachineDomainError`] if a default entry fails validation.
pub fn default_machines(clock: &impl Clock) -> Result<Vec<NewMachine>, MachineDomainError> {
    let validity = default_validity()?;
    DEFAULT_MACHINES
        .iter()
        .map(|&(name, category)| {
            Ok(NewMachine::new(
                MachineName::new(name)?,
                Some(category.to_owned()),
                validity,
                clock,
            ))
        })
        .collect()
}
