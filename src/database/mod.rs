use crate::database::error::DatabaseError::{ConnectionFailed, MissingDatabaseUrl};
use crate::database::migrations::run_migrations;
use crate::error::Result;
use crate::tools::env_args::retrieve_expected_arg_value;
use crate::tools::log_error_and_return;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;

pub(crate) mod dao;
pub(crate) mod error;
mod migrations;
pub(crate) mod model;
mod schema;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const DATABASE_URL_ARG: &str = "--database-url";

pub fn init_db() -> Result<DbPool> {
    let database_url = retrieve_expected_arg_value(DATABASE_URL_ARG, MissingDatabaseUrl)?;
    let pool = create_pool(&database_url)?;
    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;
    run_migrations(&mut connection)?;

    Ok(pool)
}

fn create_pool(database_url: &str) -> Result<DbPool, error::DatabaseError> {
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(ConnectionManager::new(database_url))
        .map_err(log_error_and_return(ConnectionFailed))
}

/// Writers contending for the SQLite write lock wait instead of failing
/// outright; waiting longer than the timeout surfaces as a transient `Busy`.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

#[cfg(test)]
pub(crate) fn with_temp_database<F, T>(function: F) -> T
where
    F: FnOnce(DbPool) -> T,
{
    use diesel_migrations::MigrationHarness;

    let temp_dir = crate::tools::test::tests::temp_dir();
    let database_url = temp_dir.join("database.db").to_str().unwrap().to_string();
    let pool = create_pool(&database_url).unwrap();
    {
        let mut connection = pool.get().unwrap();
        connection.run_pending_migrations(migrations::MIGRATIONS).unwrap();
    }

    function(pool)
}
