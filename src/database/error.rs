use crate::database::error::DatabaseError::{Busy, CorruptedValue, UnderlyingDatabase};
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DatabaseError {
    #[error("The --database-url argument is missing.")]
    MissingDatabaseUrl,
    #[error("The connection to the database failed.")]
    ConnectionFailed,
    #[error("No database connection is available.")]
    PoolUnavailable,
    #[error("The database is busy.")]
    Busy,
    #[error("A stored value couldn't be decoded: {0}")]
    CorruptedValue(String),
    #[error("An error occurred within the database.")]
    UnderlyingDatabase(String),
}

impl DatabaseError {
    /// Failures worth one transparent retry: the request was fine, the engine wasn't.
    pub fn is_transient(&self) -> bool {
        matches!(self, Busy | DatabaseError::PoolUnavailable)
    }
}

impl From<diesel::result::Error> for DatabaseError {
    fn from(value: diesel::result::Error) -> Self {
        if let diesel::result::Error::DatabaseError(_, information) = &value {
            if information.message().contains("database is locked") {
                return Busy;
            }
        }

        UnderlyingDatabase(value.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for DatabaseError {
    fn from(_: diesel::r2d2::PoolError) -> Self {
        DatabaseError::PoolUnavailable
    }
}

impl From<chrono::ParseError> for DatabaseError {
    fn from(value: chrono::ParseError) -> Self {
        CorruptedValue(value.to_string())
    }
}

impl From<rust_decimal::Error> for DatabaseError {
    fn from(value: rust_decimal::Error) -> Self {
        CorruptedValue(value.to_string())
    }
}

impl From<dto::enrollment_status::ParseEnrollmentStatusError> for DatabaseError {
    fn from(value: dto::enrollment_status::ParseEnrollmentStatusError) -> Self {
        CorruptedValue(value.to_string())
    }
}

impl From<dto::booking::ParseBookingStatusError> for DatabaseError {
    fn from(value: dto::booking::ParseBookingStatusError) -> Self {
        CorruptedValue(value.to_string())
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for DatabaseError {
    fn from(value: Box<dyn Error + Send + Sync + 'static>) -> Self {
        UnderlyingDatabase(value.to_string())
    }
}
