//! r2d2 connection pool construction.

use super::PersistenceError;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::debug;

/// `PostgreSQL` connection pool shared by all repositories.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// r2d2 opens the initial connections eagerly, so an unreachable database
/// is reported here rather than on first use.
///
/// # Errors
///
/// Returns [`PersistenceError::EmptyPool`] when `max_connections` is zero,
/// or [`PersistenceError::Pool`] when the pool cannot be established.
pub fn build_pool(database_url: &str, max_connections: u32) -> Result<PgPool, PersistenceError> {
    if max_connections == 0 {
        return Err(PersistenceError::EmptyPool);
    }

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_connections).build(manager)?;
    debug!(max_connections, "database pool ready");
    Ok(pool)
}
