//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use wegewart::job::{
    adapters::memory::InMemoryJobRepository, domain::UserId, services::JobReportingService,
};
use wegewart::machine::{
    adapters::memory::InMemoryMachineRepository, services::MachineInventoryService,
};

/// Warden used by most job tests.
pub const WARDEN: UserId = UserId::new(20);
/// Second warden for filter tests.
pub const NEIGHBOUR: UserId = UserId::new(21);
/// Approving user.
pub const ADMIN: UserId = UserId::new(1);

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub const fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub type JobService = JobReportingService<InMemoryJobRepository, FixtureClock>;
pub type MachineService = MachineInventoryService<InMemoryMachineRepository, FixtureClock>;

pub fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn work_day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("valid date")
}

#[fixture]
pub fn clock() -> FixtureClock {
    FixtureClock::at(instant(2025, 7, 1))
}

#[fixture]
pub fn job_service(clock: FixtureClock) -> JobService {
    let repository = InMemoryJobRepository::with_users([WARDEN, NEIGHBOUR, ADMIN]);
    JobReportingService::new(Arc::new(repository), Arc::new(clock))
}

#[fixture]
pub fn machine_service(clock: FixtureClock) -> MachineService {
    MachineInventoryService::new(Arc::new(InMemoryMachineRepository::new()), Arc::new(clock))
}
