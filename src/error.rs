use crate::booking::error::BookingError;
use crate::catalog::error::CatalogError;
use crate::database::error::DatabaseError;
use crate::enrollment::error::EnrollmentError;
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("An error has occurred with the database.")]
    Database(#[from] DatabaseError),
    #[error("An error has occurred with the catalog.")]
    Catalog(#[from] CatalogError),
    #[error("An error has occurred while handling an enrollment.")]
    Enrollment(#[from] EnrollmentError),
    #[error("An error has occurred while handling a booking.")]
    Booking(#[from] BookingError),
}
