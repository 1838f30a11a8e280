//! End-to-end tests for the initialisation routine.

use std::sync::Arc;

use crate::postgres::helpers::{FixtureClock, TestDatabase, clock, test_runtime};
use chrono::{TimeZone, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use wegewart::bootstrap::{BootstrapError, initialise};
use wegewart::config::{ConfigError, WegewartSettings};
use wegewart::machine::{
    adapters::postgres::PostgresMachineRepository,
    domain::{DEFAULT_MACHINES, MachineFilter},
    ports::MachineRepository,
    services::SeedOutcome,
};

fn settings(database_url: Option<String>, seed_machines: bool) -> WegewartSettings {
    WegewartSettings {
        database_url,
        max_connections: 2,
        seed_machines,
        json_logs: false,
    }
}

#[rstest]
fn initialise_creates_schema_and_seeds_defaults(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
) {
    let database = TestDatabase::provision(shared_test_cluster, false).expect("database setup");
    let rt = test_runtime();
    let config = settings(Some(database.url().to_owned()), true);

    let report = rt
        .block_on(initialise(&config, Arc::new(clock)))
        .expect("initialise");

    assert_eq!(report.applied_migrations.len(), 2);
    assert!(matches!(report.seed, Some(SeedOutcome::Seeded(ref machines)) if machines.len() == 3));

    let repository = PostgresMachineRepository::new(report.pool.clone());
    let machines = rt
        .block_on(repository.list(&MachineFilter::new()))
        .expect("list");
    assert_eq!(machines.len(), DEFAULT_MACHINES.len());
    let from = Utc
        .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    let to = Utc
        .with_ymd_and_hms(2099, 12, 31, 23, 59, 59)
        .single()
        .expect("valid timestamp");
    for (name, category) in DEFAULT_MACHINES {
        let machine = machines
            .iter()
            .find(|machine| machine.name().as_str() == name)
            .expect("default machine present");
        assert_eq!(machine.category(), Some(category));
        assert!(machine.is_active());
        assert_eq!(machine.validity().starts_at(), from);
        assert_eq!(machine.validity().ends_at(), to);
    }
}

#[rstest]
fn initialise_twice_is_harmless(shared_test_cluster: &'static TestCluster, clock: FixtureClock) {
    let database = TestDatabase::provision(shared_test_cluster, false).expect("database setup");
    let rt = test_runtime();
    let config = settings(Some(database.url().to_owned()), true);

    let first = rt
        .block_on(initialise(&config, Arc::new(clock)))
        .expect("first run");
    drop(first);
    let second = rt
        .block_on(initialise(&config, Arc::new(clock)))
        .expect("second run");

    assert!(second.applied_migrations.is_empty());
    assert_eq!(second.seed, Some(SeedOutcome::AlreadySeeded { existing: 3 }));
}

#[rstest]
fn seeding_can_be_disabled(shared_test_cluster: &'static TestCluster, clock: FixtureClock) {
    let database = TestDatabase::provision(shared_test_cluster, false).expect("database setup");
    let rt = test_runtime();
    let config = settings(Some(database.url().to_owned()), false);

    let report = rt
        .block_on(initialise(&config, Arc::new(clock)))
        .expect("initialise");

    assert!(report.seed.is_none());
    let repository = PostgresMachineRepository::new(report.pool.clone());
    assert_eq!(rt.block_on(repository.count()).expect("count"), 0);
}

#[rstest]
fn missing_database_url_is_reported(clock: FixtureClock) {
    let rt = test_runtime();

    let result = rt.block_on(initialise(&settings(None, true), Arc::new(clock)));

    assert!(matches!(
        result,
        Err(BootstrapError::Config(ConfigError::MissingDatabaseUrl))
    ));
}
