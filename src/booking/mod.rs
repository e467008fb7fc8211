use crate::booking::error::BookingError;
use crate::booking::error::BookingError::{
    AlreadyBooked, ClassClosed, ClassFull, InactiveMember, NotAttendable, NotCancellable,
    NotScheduledThatDay, UnknownBooking, UnknownMember,
};
use crate::capacity;
use crate::capacity::Reservation;
use crate::catalog;
use crate::database::error::DatabaseError;
use crate::database::model::booking::NewBooking;
use crate::database::{DbPool, dao};
use crate::notification::NotificationSink;
use chrono::{Datelike, NaiveDate, Utc};
use diesel::SqliteConnection;
use dto::booking::{Booking, BookingStatus};
use dto::member::Member;
use dto::registration::BookingRequest;

pub mod error;

/// Reserve one concrete session of a class.
///
/// Bookings follow the same ledger discipline as standing enrollments, only
/// counted per session date: the recount and the insert share one immediate
/// transaction, so a full session can't be oversold by racing requests.
pub fn book_session(
    pool: &DbPool,
    notification_sink: &dyn NotificationSink,
    request: &BookingRequest,
) -> Result<Booking, BookingError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;
    let member = checked_member(&mut connection, *request.member_id())?;

    let (offering, booking) = connection.immediate_transaction(|connection| {
        let offering = catalog::find_class_offering(connection, *request.class_id())?;
        if !*offering.open() {
            Err(ClassClosed)?;
        }
        if !offering.weekdays().contains(request.session_date().weekday()) {
            Err(NotScheduledThatDay)?;
        }
        if dao::booking::has_occupying_booking(
            connection,
            *member.id(),
            *offering.id(),
            *request.session_date(),
        )? {
            Err(AlreadyBooked)?;
        }

        let offering_id = *offering.id();
        let session_date = *request.session_date();
        let record = NewBooking {
            member_id: *member.id(),
            class_id: offering_id,
            session_date,
            status: BookingStatus::Booked,
            created_at: Utc::now().naive_local(),
        };
        let reservation = capacity::try_reserve(
            connection,
            *offering.capacity(),
            |connection| {
                dao::booking::count_occupying_bookings(connection, offering_id, session_date)
            },
            |connection| dao::booking::insert_booking(connection, &record),
        )?;

        match reservation {
            Reservation::Full => Err(ClassFull),
            Reservation::Reserved(booking_id) => {
                Ok((offering, created_booking(connection, booking_id)?))
            }
        }
    })?;

    info!(
        "Session booked [booking: {}, member: {}, class: {}, date: {}]",
        booking.id(),
        member.id(),
        offering.id(),
        booking.session_date()
    );
    notification_sink.notify(
        &member,
        "Your session is booked",
        &format!(
            "You're booked for \"{}\" on {} at {}.",
            offering.name(),
            booking.session_date(),
            offering.start_time()
        ),
    );

    Ok(booking)
}

pub fn cancel_booking(
    pool: &DbPool,
    notification_sink: &dyn NotificationSink,
    booking_id: i32,
) -> Result<Booking, BookingError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;

    let booking = connection.immediate_transaction(|connection| {
        let booking = dao::booking::find_booking(connection, booking_id)?
            .ok_or(UnknownBooking(booking_id))?;
        if *booking.status() != BookingStatus::Booked {
            Err(NotCancellable)?;
        }

        dao::booking::update_booking_status(connection, booking_id, BookingStatus::Canceled)?;
        created_booking(connection, booking_id)
    })?;

    info!("Booking canceled [booking: {booking_id}]");
    if let Some(member) = dao::member::find_member(&mut connection, *booking.member_id())? {
        notification_sink.notify(
            &member,
            "Your booking is canceled",
            &format!(
                "Your booking for {} was canceled.",
                booking.session_date()
            ),
        );
    }

    Ok(booking)
}

/// Record that the member showed up. The slot stays occupied:
/// the place was used, not freed.
pub fn mark_attended(pool: &DbPool, booking_id: i32) -> Result<Booking, BookingError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;

    let booking = connection.immediate_transaction(|connection| {
        let booking = dao::booking::find_booking(connection, booking_id)?
            .ok_or(UnknownBooking(booking_id))?;
        if *booking.status() != BookingStatus::Booked {
            Err(NotAttendable)?;
        }

        dao::booking::update_booking_status(connection, booking_id, BookingStatus::Attended)?;
        created_booking(connection, booking_id)
    })?;

    info!("Attendance recorded [booking: {booking_id}]");

    Ok(booking)
}

/// How many places are left for one session of a class.
/// Advisory only: the figure can be stale the moment it is read,
/// the booking transaction recounts before writing.
pub fn available_slots(
    pool: &DbPool,
    class_offering_id: i32,
    session_date: NaiveDate,
) -> Result<i32, BookingError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;
    let offering = catalog::find_class_offering(&mut connection, class_offering_id)?;
    if !offering.weekdays().contains(session_date.weekday()) {
        return Ok(0);
    }

    let booked =
        dao::booking::count_occupying_bookings(&mut connection, class_offering_id, session_date)?;

    Ok((offering.capacity() - booked as i32).max(0))
}

/// Whether a booking attempt by this member would currently be accepted.
/// Advisory, like [available_slots].
pub fn can_book(
    pool: &DbPool,
    member_id: i32,
    class_offering_id: i32,
    session_date: NaiveDate,
) -> Result<bool, BookingError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;

    let member = match dao::member::find_member(&mut connection, member_id)? {
        Some(member) if *member.active() => member,
        _ => return Ok(false),
    };
    let offering = catalog::find_class_offering(&mut connection, class_offering_id)?;
    if !*offering.open() || !offering.weekdays().contains(session_date.weekday()) {
        return Ok(false);
    }
    if dao::booking::has_occupying_booking(
        &mut connection,
        *member.id(),
        class_offering_id,
        session_date,
    )? {
        return Ok(false);
    }

    let booked =
        dao::booking::count_occupying_bookings(&mut connection, class_offering_id, session_date)?;

    Ok(booked < i64::from(*offering.capacity()))
}

fn checked_member(
    connection: &mut SqliteConnection,
    member_id: i32,
) -> Result<Member, BookingError> {
    let member =
        dao::member::find_member(connection, member_id)?.ok_or(UnknownMember(member_id))?;
    if !member.active() {
        Err(InactiveMember(member_id))?;
    }

    Ok(member)
}

fn created_booking(
    connection: &mut SqliteConnection,
    booking_id: i32,
) -> Result<Booking, BookingError> {
    dao::booking::find_booking(connection, booking_id)?.ok_or(UnknownBooking(booking_id))
}
