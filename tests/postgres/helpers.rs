//! Shared helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::Clock;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::fixture;
use tokio::runtime::Runtime;
use uuid::Uuid;
use wegewart::job::domain::UserId;
use wegewart::persistence::{PgPool, build_pool, run_migrations};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Stand-in for the externally owned user table.
const USERS_SQL: &str = include_str!("../fixtures/users.sql");

diesel::table! {
    users (id) {
        id -> Int4,
        username -> Text,
    }
}

/// Clock frozen at a whole second so timestamps survive the round trip
/// through `TIMESTAMPTZ` unchanged.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
pub fn clock() -> FixtureClock {
    FixtureClock {
        utc_now: Utc
            .with_ymd_and_hms(2025, 8, 18, 7, 45, 0)
            .single()
            .expect("valid timestamp"),
    }
}

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Throwaway database dropped when the value goes out of scope.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
    url: String,
}

impl TestDatabase {
    /// Creates a database holding the `users` stub, optionally with the
    /// embedded migrations applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or prepared.
    pub fn provision(cluster: &'static TestCluster, migrate: bool) -> Result<Self, BoxError> {
        let name = format!("wegewart_{}", Uuid::new_v4().simple());
        cluster
            .create_database(name.as_str())
            .map_err(|err| format!("create database {name}: {err:?}"))?;
        let url = cluster.connection().database_url(&name);
        let database = Self { cluster, name, url };

        let mut connection = database.connect()?;
        connection.batch_execute(USERS_SQL)?;
        if migrate {
            run_migrations(&mut connection)?;
        }
        Ok(database)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Opens a direct connection for raw SQL checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn connect(&self) -> Result<PgConnection, BoxError> {
        Ok(PgConnection::establish(&self.url)?)
    }

    /// Builds a small pool for repository construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    pub fn pool(&self) -> Result<PgPool, BoxError> {
        Ok(build_pool(&self.url, 2)?)
    }

    /// Inserts a user row and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_user(&self, username: &str) -> Result<UserId, BoxError> {
        let mut connection = self.connect()?;
        let id = diesel::insert_into(users::table)
            .values(users::username.eq(username))
            .returning(users::id)
            .get_result::<i32>(&mut connection)?;
        Ok(UserId::new(id))
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {err:?}", self.name);
        }
    }
}
