use crate::database::error::DatabaseError;
use diesel::SqliteConnection;

/// Outcome of a reservation attempt against a fixed-capacity offering.
#[derive(Debug, PartialEq)]
pub(crate) enum Reservation {
    Reserved(i32),
    Full,
}

/// Reserve a slot by counting live rows and inserting only while there is headroom.
///
/// Capacity is derived from the rows themselves rather than kept in a counter
/// that could drift. A plain check-then-insert is racy: two writers can both
/// observe `count < capacity` and both insert. The caller must therefore run
/// this inside `SqliteConnection::immediate_transaction`, whose `BEGIN
/// IMMEDIATE` takes the write lock up front: the count observed here is then
/// authoritative, and any error unwinds the transaction without leaving a
/// half-reserved slot behind.
///
/// The same discipline covers both standing class enrollments and per-date
/// bookings; the closures say what is being counted and what gets written.
pub(crate) fn try_reserve<C, I>(
    connection: &mut SqliteConnection,
    capacity: i32,
    count_occupying: C,
    insert_row: I,
) -> Result<Reservation, DatabaseError>
where
    C: FnOnce(&mut SqliteConnection) -> Result<i64, DatabaseError>,
    I: FnOnce(&mut SqliteConnection) -> Result<i32, DatabaseError>,
{
    let occupied = count_occupying(connection)?;
    if occupied >= i64::from(capacity) {
        return Ok(Reservation::Full);
    }

    Ok(Reservation::Reserved(insert_row(connection)?))
}
