//! In-memory repository for job reporting tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::job::{
    domain::{Job, JobFilter, JobId, NewJob, UserId, listing_order},
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};

/// Thread-safe in-memory job repository.
///
/// Mirrors the foreign keys of the relational schema: jobs may only
/// reference users that were registered with the repository first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobRepository {
    state: Arc<RwLock<InMemoryJobState>>,
}

#[derive(Debug, Default)]
struct InMemoryJobState {
    users: HashSet<UserId>,
    jobs: BTreeMap<JobId, Job>,
    last_id: i32,
}

impl InMemoryJobRepository {
    /// Creates an empty repository with no known users.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository that accepts the given users.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = UserId>) -> Self {
        let state = InMemoryJobState {
            users: users.into_iter().collect(),
            ..InMemoryJobState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Makes `user` available as a foreign key target.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn register_user(&self, user: UserId) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.users.insert(user);
        Ok(())
    }
}

fn ensure_users_exist(state: &InMemoryJobState, job: &Job) -> JobRepositoryResult<()> {
    let referenced = std::iter::once(job.wegewart_id()).chain(job.approved_by());
    for user in referenced {
        if !state.users.contains(&user) {
            return Err(JobRepositoryError::UnknownUser(user));
        }
    }
    Ok(())
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: &NewJob) -> JobRepositoryResult<Job> {
        let mut state = self.state.write().map_err(|err| {
            JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.users.contains(&job.wegewart_id()) {
            return Err(JobRepositoryError::UnknownUser(job.wegewart_id()));
        }

        let next_id = state.last_id.checked_add(1).ok_or_else(|| {
            JobRepositoryError::persistence(std::io::Error::other("job id sequence exhausted"))
        })?;
        state.last_id = next_id;
        let stored = Job::from_new(JobId::new(next_id), job.clone());
        state.jobs.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, job: &Job) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.jobs.contains_key(&job.id()) {
            return Err(JobRepositoryError::NotFound(job.id()));
        }
        ensure_users_exist(&state, job)?;
        state.jobs.insert(job.id(), job.clone());
        Ok(())
    }

    async fn update_many(&self, jobs: &[Job]) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        for job in jobs {
            if !state.jobs.contains_key(&job.id()) {
                return Err(JobRepositoryError::NotFound(job.id()));
            }
            ensure_users_exist(&state, job)?;
        }
        for job in jobs {
            state.jobs.insert(job.id(), job.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        let state = self.state.read().map_err(|err| {
            JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.jobs.get(&id).cloned())
    }

    async fn list(&self, filter: &JobFilter) -> JobRepositoryResult<Vec<Job>> {
        let state = self.state.read().map_err(|err| {
            JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut jobs: Vec<Job> = state
            .jobs
            .values()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        jobs.sort_by(listing_order);
        Ok(jobs)
    }
}
