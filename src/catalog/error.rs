use crate::database::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("No class offering with id {0} is known.")]
    UnknownClassOffering(i32),
    #[error("No package offering with id {0} is known.")]
    UnknownPackageOffering(i32),
    #[error("A class needs at least one place.")]
    InvalidCapacity,
    #[error("A class must end after it starts.")]
    InvalidTimeWindow,
    #[error("A class needs at least one weekday.")]
    EmptyWeekdaySet,
    #[error("A price can't be negative.")]
    NegativePrice,
    #[error("A package must last at least one month.")]
    InvalidDuration,
    #[error("An error has occurred with the database.")]
    Database(#[from] DatabaseError),
}

impl CatalogError {
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::Database(error) if error.is_transient())
    }
}
