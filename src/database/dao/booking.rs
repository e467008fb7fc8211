use super::Result;
use crate::database::model::booking::{Booking, NewBooking};
use chrono::NaiveDate;
use diesel::prelude::*;
use dto::booking::BookingStatus;

fn occupying_statuses() -> Vec<String> {
    vec![
        BookingStatus::Booked.to_string(),
        BookingStatus::Attended.to_string(),
    ]
}

pub(crate) fn insert_booking(
    connection: &mut SqliteConnection,
    record: &NewBooking,
) -> Result<i32> {
    use crate::database::schema::booking;

    let inserted_id = diesel::insert_into(booking::table)
        .values((
            booking::member_id.eq(record.member_id),
            booking::class_id.eq(record.class_id),
            booking::session_date.eq(record.session_date.to_string()),
            booking::status.eq(record.status.to_string()),
            booking::created_at.eq(record.created_at.to_string()),
        ))
        .returning(booking::id)
        .get_result(connection)?;

    Ok(inserted_id)
}

pub(crate) fn find_booking(
    connection: &mut SqliteConnection,
    booking_id: i32,
) -> Result<Option<dto::booking::Booking>> {
    use crate::database::schema::booking;

    let result = booking::table
        .find(booking_id)
        .select(Booking::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::booking::Booking::try_from).transpose()
}

/// The number of slot-holding bookings of a class on one session date.
/// Authoritative only inside the write transaction that performs the insert.
pub(crate) fn count_occupying_bookings(
    connection: &mut SqliteConnection,
    class_offering_id: i32,
    session_date: NaiveDate,
) -> Result<i64> {
    use crate::database::schema::booking;

    let count = booking::table
        .filter(booking::class_id.eq(class_offering_id))
        .filter(booking::session_date.eq(session_date.to_string()))
        .filter(booking::status.eq_any(occupying_statuses()))
        .count()
        .get_result(connection)?;

    Ok(count)
}

pub(crate) fn has_occupying_booking(
    connection: &mut SqliteConnection,
    member_id: i32,
    class_offering_id: i32,
    session_date: NaiveDate,
) -> Result<bool> {
    use crate::database::schema::booking;

    let count: i64 = booking::table
        .filter(booking::member_id.eq(member_id))
        .filter(booking::class_id.eq(class_offering_id))
        .filter(booking::session_date.eq(session_date.to_string()))
        .filter(booking::status.eq_any(occupying_statuses()))
        .count()
        .get_result(connection)?;

    Ok(count > 0)
}

pub(crate) fn update_booking_status(
    connection: &mut SqliteConnection,
    booking_id: i32,
    new_status: BookingStatus,
) -> Result<usize> {
    use crate::database::schema::booking;

    let count = diesel::update(booking::table.find(booking_id))
        .set(booking::status.eq(new_status.to_string()))
        .execute(connection)?;

    Ok(count)
}
