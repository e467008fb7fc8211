use crate::booking::error::BookingError::{
    AlreadyBooked, Catalog, ClassClosed, ClassFull, Database, InactiveMember, NotAttendable,
    NotCancellable, NotScheduledThatDay, UnknownBooking, UnknownMember,
};
use crate::catalog::error::CatalogError;
use crate::database::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    #[error("The class is full on that date.")]
    ClassFull,
    #[error("The class is closed.")]
    ClassClosed,
    #[error("The class doesn't meet on that date.")]
    NotScheduledThatDay,
    #[error("The member already holds a booking for that session.")]
    AlreadyBooked,
    #[error("The booking can't be cancelled in its current state.")]
    NotCancellable,
    #[error("Only booked sessions can be marked attended.")]
    NotAttendable,
    #[error("No member with id {0} is known.")]
    UnknownMember(i32),
    #[error("The member with id {0} isn't active anymore.")]
    InactiveMember(i32),
    #[error("No booking with id {0} is known.")]
    UnknownBooking(i32),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("An error has occurred with the database.")]
    Database(#[from] DatabaseError),
}

impl BookingError {
    pub fn is_business_rejection(&self) -> bool {
        matches!(
            self,
            ClassFull | ClassClosed | NotScheduledThatDay | AlreadyBooked | NotCancellable
                | NotAttendable
        )
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            UnknownMember(_)
                | InactiveMember(_)
                | UnknownBooking(_)
                | Catalog(CatalogError::UnknownClassOffering(_))
        )
    }

    pub fn is_transient(&self) -> bool {
        match self {
            Database(error) => error.is_transient(),
            Catalog(error) => error.is_transient(),
            _ => false,
        }
    }
}

impl From<diesel::result::Error> for BookingError {
    fn from(value: diesel::result::Error) -> Self {
        Database(DatabaseError::from(value))
    }
}
