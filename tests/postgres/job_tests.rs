//! Job persistence tests for the `PostgreSQL` repository.

use std::sync::Arc;

use crate::postgres::helpers::{FixtureClock, TestDatabase, clock, test_runtime};
use chrono::NaiveDate;
use diesel::prelude::*;
use mockable::Clock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use wegewart::job::{
    adapters::postgres::PostgresJobRepository,
    domain::{Job, JobFilter, JobId, JobStatus, NewJob, UserId},
    ports::{JobRepository, JobRepositoryError},
    services::{JobReportingError, JobReportingService, SubmitJobRequest},
};

type PgJobService = JobReportingService<PostgresJobRepository, FixtureClock>;

struct Context {
    service: PgJobService,
    repository: Arc<PostgresJobRepository>,
    warden: UserId,
    admin: UserId,
    database: TestDatabase,
}

fn context(cluster: &'static TestCluster, clock: FixtureClock) -> Context {
    let database = TestDatabase::provision(cluster, true).expect("database setup");
    let warden = database.insert_user("wegewart").expect("warden");
    let admin = database.insert_user("admin").expect("admin");
    let repository = Arc::new(PostgresJobRepository::new(
        database.pool().expect("pool"),
    ));
    Context {
        service: JobReportingService::new(Arc::clone(&repository), Arc::new(clock)),
        repository,
        warden,
        admin,
        database,
    }
}

fn day(month: u32, day_of_month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day_of_month).expect("valid date")
}

fn report(wegewart_id: UserId, date: NaiveDate, village: &str) -> SubmitJobRequest {
    SubmitJobRequest::new(wegewart_id, date, village, "Brücke gesäubert", 2.25)
}

#[rstest]
fn unknown_warden_violates_foreign_key(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
) {
    let ctx = context(shared_test_cluster, clock);
    let rt = test_runtime();
    let stranger = UserId::new(ctx.admin.value() + 1_000);

    let result = rt.block_on(ctx.service.submit(report(stranger, day(5, 1), "Oberdorf")));

    assert!(matches!(
        result,
        Err(JobReportingError::Repository(JobRepositoryError::UnknownUser(user))) if user == stranger
    ));
}

#[rstest]
fn new_job_round_trips_with_defaults(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
) {
    let ctx = context(shared_test_cluster, clock);
    let rt = test_runtime();

    let job = rt
        .block_on(ctx.service.submit(report(ctx.warden, day(5, 1), "Oberdorf")))
        .expect("submit");
    let stored = rt
        .block_on(ctx.service.find_by_id(job.id()))
        .expect("lookup")
        .expect("job exists");

    assert_eq!(stored, job);
    assert_eq!(stored.status(), JobStatus::Submitted);
    assert!(!stored.approved());
    assert_eq!(stored.created_at(), clock.utc());
    assert_eq!(stored.updated_at(), stored.created_at());
    assert_eq!(stored.description(), "Brücke gesäubert");
}

#[rstest]
fn column_defaults_match_a_new_submission(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
) {
    let ctx = context(shared_test_cluster, clock);
    let mut connection = ctx.database.connect().expect("connection");

    diesel::sql_query(format!(
        "INSERT INTO jobs (wegewart_id, date, village, description, hours, created_at, updated_at) \
         VALUES ({}, '2025-05-01', 'Oberdorf', 'Bank gestrichen', 1.0, now(), now())",
        ctx.warden.value()
    ))
    .execute(&mut connection)
    .expect("raw insert with defaults");

    let rt = test_runtime();
    let listed = rt
        .block_on(ctx.repository.list(&JobFilter::new()))
        .expect("list");
    assert_eq!(listed.len(), 1);
    assert!(
        listed
            .iter()
            .all(|job| job.status() == JobStatus::Submitted && !job.approved())
    );
}

#[rstest]
#[case("erledigt")]
#[case("approved")]
#[case("")]
fn schema_rejects_unknown_status(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
    #[case] status: &str,
) {
    let ctx = context(shared_test_cluster, clock);
    let rt = test_runtime();
    let job = rt
        .block_on(ctx.service.submit(report(ctx.warden, day(5, 1), "Oberdorf")))
        .expect("submit");
    let mut connection = ctx.database.connect().expect("connection");

    let result = diesel::sql_query("UPDATE jobs SET status = $1 WHERE id = $2")
        .bind::<diesel::sql_types::Text, _>(status)
        .bind::<diesel::sql_types::Integer, _>(job.id().value())
        .execute(&mut connection);

    assert!(matches!(
        result,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::CheckViolation,
            _
        ))
    ));
}

#[rstest]
fn approval_persists_decider_and_time(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
) {
    let ctx = context(shared_test_cluster, clock);
    let rt = test_runtime();
    let job = rt
        .block_on(ctx.service.submit(report(ctx.warden, day(5, 1), "Oberdorf")))
        .expect("submit");

    rt.block_on(ctx.service.approve(job.id(), ctx.admin, Some("ok".to_owned())))
        .expect("approve");
    let stored = rt
        .block_on(ctx.repository.find_by_id(job.id()))
        .expect("lookup")
        .expect("job exists");

    assert_eq!(stored.status(), JobStatus::Approved);
    assert!(stored.approved());
    assert_eq!(stored.approved_by(), Some(ctx.admin));
    assert_eq!(stored.approved_at(), Some(clock.utc()));
    assert_eq!(stored.admin_notes(), Some("ok"));
}

#[rstest]
fn unknown_approver_violates_foreign_key(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
) {
    let ctx = context(shared_test_cluster, clock);
    let rt = test_runtime();
    let job = rt
        .block_on(ctx.service.submit(report(ctx.warden, day(5, 1), "Oberdorf")))
        .expect("submit");
    let ghost = UserId::new(ctx.admin.value() + 500);

    let result = rt.block_on(ctx.service.approve(job.id(), ghost, None));

    assert!(matches!(
        result,
        Err(JobReportingError::Repository(JobRepositoryError::UnknownUser(user))) if user == ghost
    ));
}

#[rstest]
fn update_of_missing_job_is_not_found(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
) {
    let ctx = context(shared_test_cluster, clock);
    let rt = test_runtime();
    let ghost = Job::from_new(
        JobId::new(4_242),
        NewJob::new(ctx.warden, day(5, 1), "Oberdorf", "nichts", 0.5, &clock),
    );

    let result = rt.block_on(ctx.repository.update(&ghost));

    assert!(matches!(
        result,
        Err(JobRepositoryError::NotFound(id)) if id == JobId::new(4_242)
    ));
}

#[rstest]
fn failed_batch_update_rolls_back_earlier_writes(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
) {
    let ctx = context(shared_test_cluster, clock);
    let rt = test_runtime();
    let mut submitted = rt
        .block_on(ctx.service.submit(report(ctx.warden, day(5, 1), "Oberdorf")))
        .expect("submit");
    submitted
        .approve(ctx.admin, Some("passt".to_owned()), &clock)
        .expect("approve in memory");
    let ghost = Job::from_new(
        JobId::new(4_243),
        NewJob::new(ctx.warden, day(5, 2), "Oberdorf", "nichts", 0.5, &clock),
    );

    let result = rt.block_on(ctx.repository.update_many(&[submitted.clone(), ghost]));

    assert!(matches!(
        result,
        Err(JobRepositoryError::NotFound(id)) if id == JobId::new(4_243)
    ));
    let stored = rt
        .block_on(ctx.repository.find_by_id(submitted.id()))
        .expect("lookup")
        .expect("job exists");
    assert_eq!(stored.status(), JobStatus::Submitted);
    assert!(!stored.approved());
    assert_eq!(stored.admin_notes(), None);
}

#[rstest]
fn bulk_approval_persists_every_decided_job(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
) {
    let ctx = context(shared_test_cluster, clock);
    let rt = test_runtime();
    let ids: Vec<JobId> = (1..=3)
        .map(|day_of_month| {
            rt.block_on(ctx.service.submit(report(ctx.warden, day(5, day_of_month), "Oberdorf")))
                .expect("submit")
                .id()
        })
        .collect();

    let outcome = rt
        .block_on(ctx.service.approve_many(&ids, ctx.admin))
        .expect("bulk approval");

    assert_eq!(outcome.decided, ids);
    assert!(outcome.skipped.is_empty());
    let approved = rt
        .block_on(ctx.service.list(&JobFilter::new().with_approved(true)))
        .expect("list");
    assert_eq!(approved.len(), 3);
    assert!(approved.iter().all(|job| job.approved_by() == Some(ctx.admin)));
}

#[rstest]
#[case(JobFilter::new().with_village("Oberdorf"), 3)]
#[case(JobFilter::new().with_village("Talheim"), 0)]
#[case(JobFilter::new().on_date(day(5, 2)), 2)]
#[case(JobFilter::new().with_date_from(day(5, 2)), 3)]
#[case(JobFilter::new().with_date_to(day(5, 2)), 3)]
#[case(JobFilter::new().with_status(JobStatus::Submitted).with_approved(false), 4)]
fn filters_match_regardless_of_insertion_order(
    shared_test_cluster: &'static TestCluster,
    clock: FixtureClock,
    #[case] filter: JobFilter,
    #[case] expected: usize,
) {
    let ctx = context(shared_test_cluster, clock);
    let rt = test_runtime();
    for (date, village) in [
        (day(5, 3), "Oberdorf"),
        (day(5, 1), "Unterdorf"),
        (day(5, 2), "Oberdorf"),
        (day(5, 2), "Oberdorf"),
    ] {
        rt.block_on(ctx.service.submit(report(ctx.warden, date, village)))
            .expect("submit");
    }

    let listed = rt.block_on(ctx.service.list(&filter)).expect("list");

    assert_eq!(listed.len(), expected);
    assert!(listed.iter().all(|job| filter.matches(job)));
    let ids: Vec<JobId> = listed.iter().map(Job::id).collect();
    let mut expected_order = listed.clone();
    expected_order.sort_by(|a, b| {
        b.date()
            .cmp(&a.date())
            .then_with(|| b.created_at().cmp(&a.created_at()))
            .then_with(|| b.id().cmp(&a.id()))
    });
    let expected_ids: Vec<JobId> = expected_order.iter().map(Job::id).collect();
    assert_eq!(ids, expected_ids);
}
