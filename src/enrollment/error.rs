use crate::catalog::error::CatalogError;
use crate::database::error::DatabaseError;
use crate::enrollment::error::EnrollmentError::{
    Catalog, ClassClosed, ClassFull, Database, DuplicateActivePackage, InactiveMember,
    InvalidDateRange, InvalidDuration, NotAwaitingPayment, NotCancellable, NotExtendable,
    ScheduleConflict, UnknownEnrollment, UnknownMember, UnknownPaymentReference,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EnrollmentError {
    #[error("The member already holds an active package enrollment.")]
    DuplicateActivePackage,
    #[error("The requested schedule overlaps another class the member is enrolled in.")]
    ScheduleConflict,
    #[error("The class is full.")]
    ClassFull,
    #[error("The class is closed to new enrollments.")]
    ClassClosed,
    #[error("The enrollment can't be cancelled at this point.")]
    NotCancellable,
    #[error("Only active package enrollments can be extended.")]
    NotExtendable,
    #[error("The enrollment is no longer awaiting payment.")]
    NotAwaitingPayment,
    #[error("The end date can't precede the start date.")]
    InvalidDateRange,
    #[error("An enrollment must cover at least one month.")]
    InvalidDuration,
    #[error("No member with id {0} is known.")]
    UnknownMember(i32),
    #[error("The member with id {0} isn't active anymore.")]
    InactiveMember(i32),
    #[error("No enrollment with id {0} is known.")]
    UnknownEnrollment(i32),
    #[error("No enrollment matches payment reference '{0}'.")]
    UnknownPaymentReference(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("An error has occurred with the database.")]
    Database(#[from] DatabaseError),
}

impl EnrollmentError {
    /// Expected business outcomes. Returned to the caller as-is and never
    /// retried: running the same request again can't change the answer.
    pub fn is_business_rejection(&self) -> bool {
        matches!(
            self,
            DuplicateActivePackage
                | ScheduleConflict
                | ClassFull
                | ClassClosed
                | NotCancellable
                | NotExtendable
                | NotAwaitingPayment
        )
    }

    /// Requests that were never going to work, caught before any transaction opens.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            InvalidDateRange
                | InvalidDuration
                | UnknownMember(_)
                | InactiveMember(_)
                | UnknownEnrollment(_)
                | UnknownPaymentReference(_)
                | Catalog(CatalogError::UnknownClassOffering(_))
                | Catalog(CatalogError::UnknownPackageOffering(_))
        )
    }

    /// Infrastructure hiccups, distinct from business rejections so a storage
    /// failure is never reported to a member as "the class is full".
    pub fn is_transient(&self) -> bool {
        match self {
            Database(error) => error.is_transient(),
            Catalog(error) => error.is_transient(),
            _ => false,
        }
    }
}

impl From<diesel::result::Error> for EnrollmentError {
    fn from(value: diesel::result::Error) -> Self {
        Database(DatabaseError::from(value))
    }
}
