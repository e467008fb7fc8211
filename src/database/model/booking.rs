use crate::database::error::DatabaseError;
use crate::database::model::parse_datetime;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use dto::booking::BookingStatus;
use std::str::FromStr;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::booking)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Booking {
    id: i32,
    member_id: i32,
    class_id: i32,
    session_date: String,
    status: String,
    created_at: String,
}

impl TryFrom<Booking> for dto::booking::Booking {
    type Error = DatabaseError;

    fn try_from(value: Booking) -> Result<Self, Self::Error> {
        Ok(dto::booking::Booking::new(
            value.id,
            value.member_id,
            value.class_id,
            NaiveDate::from_str(&value.session_date)?,
            BookingStatus::from_str(&value.status)?,
            parse_datetime(&value.created_at)?,
        ))
    }
}

/// A booking row about to be written.
#[derive(Debug)]
pub(crate) struct NewBooking {
    pub member_id: i32,
    pub class_id: i32,
    pub session_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}
