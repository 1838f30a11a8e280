//! `PostgreSQL` repository implementation for job reports.

use super::{
    models::{JobChangeset, JobRow, NewJobRow},
    schema::jobs,
};
use crate::job::{
    domain::{Job, JobFilter, JobId, JobStatus, NewJob, PersistedJobData, UserId},
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};
use crate::persistence::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

const WEGEWART_FK: &str = "jobs_wegewart_id_fkey";
const APPROVED_BY_FK: &str = "jobs_approved_by_fkey";

/// `PostgreSQL`-backed job repository.
#[derive(Debug, Clone)]
pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> JobRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> JobRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(JobRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(JobRepositoryError::persistence)?
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn insert(&self, job: &NewJob) -> JobRepositoryResult<Job> {
        let wegewart_id = job.wegewart_id();
        let new_row = NewJobRow {
            wegewart_id: wegewart_id.value(),
            date: job.date(),
            village: job.village().to_owned(),
            description: job.description().to_owned(),
            hours: job.hours(),
            status: job.status().as_str().to_owned(),
            approved: false,
            created_at: job.created_at(),
            updated_at: job.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(jobs::table)
                .values(&new_row)
                .returning(JobRow::as_returning())
                .get_result::<JobRow>(connection)
                .map_err(|err| map_write_error(err, wegewart_id, None))?;
            row_to_job(row)
        })
        .await
    }

    async fn update(&self, job: &Job) -> JobRepositoryResult<()> {
        let pending = PendingUpdate::from_job(job);
        self.run_blocking(move |connection| pending.apply(connection)).await
    }

    async fn update_many(&self, jobs: &[Job]) -> JobRepositoryResult<()> {
        let pending: Vec<PendingUpdate> = jobs.iter().map(PendingUpdate::from_job).collect();
        self.run_blocking(move |connection| {
            connection.transaction::<_, JobRepositoryError, _>(|tx_conn| {
                for update in &pending {
                    update.apply(tx_conn)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        self.run_blocking(move |connection| {
            let row = jobs::table
                .find(id.value())
                .select(JobRow::as_select())
                .first::<JobRow>(connection)
                .optional()
                .map_err(JobRepositoryError::persistence)?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn list(&self, filter: &JobFilter) -> JobRepositoryResult<Vec<Job>> {
        let criteria = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = jobs::table.select(JobRow::as_select()).into_boxed();
            if let Some(wegewart_id) = criteria.wegewart_id() {
                query = query.filter(jobs::wegewart_id.eq(wegewart_id.value()));
            }
            if let Some(from) = criteria.date_from() {
                query = query.filter(jobs::date.ge(from));
            }
            if let Some(to) = criteria.date_to() {
                query = query.filter(jobs::date.le(to));
            }
            if let Some(village) = criteria.village() {
                query = query.filter(jobs::village.eq(village.to_owned()));
            }
            if let Some(status) = criteria.status() {
                query = query.filter(jobs::status.eq(status.as_str()));
            }
            if let Some(approved) = criteria.approved() {
                query = query.filter(jobs::approved.eq(approved));
            }

            let rows = query
                .order((jobs::date.desc(), jobs::created_at.desc(), jobs::id.desc()))
                .load::<JobRow>(connection)
                .map_err(JobRepositoryError::persistence)?;
            rows.into_iter().map(row_to_job).collect()
        })
        .await
    }
}

/// Owned copy of a job's mutable columns, ready to move onto a blocking
/// thread.
struct PendingUpdate {
    job_id: JobId,
    wegewart_id: UserId,
    approved_by: Option<UserId>,
    changeset: JobChangeset,
}

impl PendingUpdate {
    fn from_job(job: &Job) -> Self {
        Self {
            job_id: job.id(),
            wegewart_id: job.wegewart_id(),
            approved_by: job.approved_by(),
            changeset: JobChangeset {
                date: job.date(),
                village: job.village().to_owned(),
                description: job.description().to_owned(),
                hours: job.hours(),
                status: job.status().as_str().to_owned(),
                approved: job.approved(),
                approved_by: job.approved_by().map(UserId::value),
                approved_at: job.approved_at(),
                updated_at: job.updated_at(),
                admin_notes: job.admin_notes().map(str::to_owned),
            },
        }
    }

    fn apply(&self, connection: &mut PgConnection) -> JobRepositoryResult<()> {
        let updated_count = diesel::update(jobs::table.find(self.job_id.value()))
            .set(&self.changeset)
            .execute(connection)
            .map_err(|err| map_write_error(err, self.wegewart_id, self.approved_by))?;

        if updated_count == 0 {
            return Err(JobRepositoryError::NotFound(self.job_id));
        }
        Ok(())
    }
}

/// Translates foreign-key violations into [`JobRepositoryError::UnknownUser`].
fn map_write_error(
    err: DieselError,
    wegewart_id: UserId,
    approved_by: Option<UserId>,
) -> JobRepositoryError {
    if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = &err {
        match (info.constraint_name(), approved_by) {
            (Some(WEGEWART_FK), _) => return JobRepositoryError::UnknownUser(wegewart_id),
            (Some(APPROVED_BY_FK), Some(approver)) => {
                return JobRepositoryError::UnknownUser(approver);
            }
            (constraint, _) => {
                debug!(?constraint, "unrecognised foreign key violation on jobs");
            }
        }
    }
    JobRepositoryError::persistence(err)
}

fn row_to_job(row: JobRow) -> JobRepositoryResult<Job> {
    let JobRow {
        id,
        wegewart_id,
        date,
        village,
        description,
        hours,
        status,
        approved,
        approved_by,
        approved_at,
        created_at,
        updated_at,
        admin_notes,
    } = row;

    let parsed_status =
        JobStatus::try_from(status.as_str()).map_err(JobRepositoryError::persistence)?;

    Ok(Job::from_persisted(PersistedJobData {
        id: JobId::new(id),
        wegewart_id: UserId::new(wegewart_id),
        date,
        village,
        description,
        hours,
        status: parsed_status,
        approved,
        approved_by: approved_by.map(UserId::new),
        approved_at,
        created_at,
        updated_at,
        admin_notes,
    }))
}
