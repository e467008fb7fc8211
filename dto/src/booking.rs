use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// A reservation of one concrete calendar occurrence of a class.
/// Distinct from an enrollment: a booking is capacity-checked per session date.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Booking {
    id: i32,
    member_id: i32,
    class_id: i32,
    session_date: NaiveDate,
    status: BookingStatus,
    created_at: NaiveDateTime,
}

impl Booking {
    pub fn new(
        id: i32,
        member_id: i32,
        class_id: i32,
        session_date: NaiveDate,
        status: BookingStatus,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            member_id,
            class_id,
            session_date,
            status,
            created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Booked,
    Canceled,
    Attended,
}

impl BookingStatus {
    /// Attended bookings keep their slot: the place was used, not freed.
    pub fn occupies_slot(&self) -> bool {
        matches!(self, BookingStatus::Booked | BookingStatus::Attended)
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            BookingStatus::Booked => "BOOKED",
            BookingStatus::Canceled => "CANCELED",
            BookingStatus::Attended => "ATTENDED",
        };
        write!(f, "{token}")
    }
}

impl FromStr for BookingStatus {
    type Err = ParseBookingStatusError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "BOOKED" => Ok(BookingStatus::Booked),
            "CANCELED" => Ok(BookingStatus::Canceled),
            "ATTENDED" => Ok(BookingStatus::Attended),
            _ => Err(ParseBookingStatusError(token.to_owned())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("'{0}' isn't a known booking status.")]
pub struct ParseBookingStatusError(pub String);
