use crate::database::error::DatabaseError;
use crate::database::model::parse_datetime;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use dto::enrollment_status::EnrollmentStatus;
use std::str::FromStr;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::enrollment)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Enrollment {
    id: i32,
    member_id: i32,
    package_id: Option<i32>,
    class_id: Option<i32>,
    start_date: String,
    end_date: String,
    status: String,
    created_at: String,
    cancellation_reason: Option<String>,
    payment_reference: Option<String>,
}

impl TryFrom<Enrollment> for dto::enrollment::Enrollment {
    type Error = DatabaseError;

    fn try_from(value: Enrollment) -> Result<Self, Self::Error> {
        Ok(dto::enrollment::Enrollment::new(
            value.id,
            value.member_id,
            value.package_id,
            value.class_id,
            NaiveDate::from_str(&value.start_date)?,
            NaiveDate::from_str(&value.end_date)?,
            EnrollmentStatus::from_str(&value.status)?,
            parse_datetime(&value.created_at)?,
            value.cancellation_reason,
            value.payment_reference,
        ))
    }
}

/// An enrollment row about to be written, as assembled by the orchestrator.
#[derive(Debug)]
pub(crate) struct NewEnrollment {
    pub member_id: i32,
    pub package_id: Option<i32>,
    pub class_id: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: EnrollmentStatus,
    pub created_at: NaiveDateTime,
    pub payment_reference: Option<String>,
}
