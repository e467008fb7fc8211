use crate::capacity;
use crate::capacity::Reservation;
use crate::catalog;
use crate::database::error::DatabaseError;
use crate::database::model::enrollment::NewEnrollment;
use crate::database::{DbPool, dao};
use crate::enrollment::error::EnrollmentError;
use crate::enrollment::error::EnrollmentError::{
    ClassClosed, ClassFull, DuplicateActivePackage, InactiveMember, InvalidDateRange,
    InvalidDuration, NotAwaitingPayment, NotCancellable, NotExtendable, ScheduleConflict,
    UnknownEnrollment, UnknownMember, UnknownPaymentReference,
};
use crate::notification::NotificationSink;
use crate::schedule;
use chrono::{Duration, Months, NaiveDate, Utc};
use diesel::SqliteConnection;
use dto::enrollment::Enrollment;
use dto::enrollment_status::EnrollmentStatus;
use dto::member::Member;
use dto::registration::{
    Cancellation, ClassRegistration, Extension, PackageRegistration, PaymentConfirmation,
};
use uuid::Uuid;

pub mod error;
mod lifecycle;

/// Register a member to a package starting today.
///
/// A member holds at most one slot-holding package enrollment at a time; the
/// check and the insert share one immediate transaction so two racing
/// requests can't both slip through.
pub fn register_package(
    pool: &DbPool,
    notification_sink: &dyn NotificationSink,
    registration: &PackageRegistration,
) -> Result<Enrollment, EnrollmentError> {
    let today = Utc::now().date_naive();
    let mut connection = pool.get().map_err(DatabaseError::from)?;
    let member = checked_member(&mut connection, *registration.member_id())?;

    let (offering, enrollment) = connection.immediate_transaction(|connection| {
        let offering = catalog::find_package_offering(connection, *registration.package_id())?;
        let months = match registration.months() {
            Some(months) => *months,
            None => *offering.duration_in_months() as u32,
        };
        if months < 1 {
            Err(InvalidDuration)?;
        }
        let end_date = today
            .checked_add_months(Months::new(months))
            .ok_or(InvalidDuration)?;

        let existing =
            dao::enrollment::find_occupying_package_enrollments(connection, *member.id(), today)?;
        if !existing.is_empty() {
            Err(DuplicateActivePackage)?;
        }

        let record = new_enrollment_record(
            &member,
            Some(*offering.id()),
            None,
            today,
            end_date,
            *registration.paid_up_front(),
        );
        let enrollment_id = dao::enrollment::insert_enrollment(connection, &record)?;

        Ok::<_, EnrollmentError>((offering, created_enrollment(connection, enrollment_id)?))
    })?;

    info!(
        "Package enrollment created [enrollment: {}, member: {}, package: {}]",
        enrollment.id(),
        member.id(),
        offering.id()
    );
    notification_sink.notify(
        &member,
        "Your registration is in",
        &format!(
            "Your \"{}\" registration runs until {}.",
            offering.name(),
            enrollment.end_date()
        ),
    );

    Ok(enrollment)
}

/// Register a member to a class for a date range.
///
/// The offering facts, the schedule conflict check and the capacity recount
/// all happen inside one immediate transaction: whatever was read outside it
/// could already be stale by the time the insert runs.
pub fn register_class(
    pool: &DbPool,
    notification_sink: &dyn NotificationSink,
    registration: &ClassRegistration,
) -> Result<Enrollment, EnrollmentError> {
    if registration.end_date() < registration.start_date() {
        return Err(InvalidDateRange);
    }

    let today = Utc::now().date_naive();
    let mut connection = pool.get().map_err(DatabaseError::from)?;
    let member = checked_member(&mut connection, *registration.member_id())?;

    let (offering, enrollment) = connection.immediate_transaction(|connection| {
        let offering = catalog::find_class_offering(connection, *registration.class_id())?;
        if !*offering.open() {
            Err(ClassClosed)?;
        }

        let enrolled =
            dao::enrollment::find_occupying_class_offerings(connection, *member.id(), today)?;
        if schedule::conflicts_with_any(&offering, &enrolled) {
            Err(ScheduleConflict)?;
        }

        let offering_id = *offering.id();
        let record = new_enrollment_record(
            &member,
            None,
            Some(offering_id),
            *registration.start_date(),
            *registration.end_date(),
            *registration.paid_up_front(),
        );
        let reservation = capacity::try_reserve(
            connection,
            *offering.capacity(),
            |connection| {
                dao::enrollment::count_occupying_class_enrollments(connection, offering_id, today)
            },
            |connection| dao::enrollment::insert_enrollment(connection, &record),
        )?;

        match reservation {
            Reservation::Full => Err(ClassFull),
            Reservation::Reserved(enrollment_id) => {
                Ok((offering, created_enrollment(connection, enrollment_id)?))
            }
        }
    })?;

    info!(
        "Class enrollment created [enrollment: {}, member: {}, class: {}]",
        enrollment.id(),
        member.id(),
        offering.id()
    );
    notification_sink.notify(
        &member,
        "See you in class",
        &format!(
            "You're in for \"{}\" ({} {}-{}) from {} to {}.",
            offering.name(),
            offering.weekdays(),
            offering.start_time(),
            offering.end_time(),
            enrollment.start_date(),
            enrollment.end_date()
        ),
    );

    Ok(enrollment)
}

/// Cancel an enrollment on a member's or admin's behalf.
pub fn cancel_enrollment(
    pool: &DbPool,
    notification_sink: &dyn NotificationSink,
    enrollment_id: i32,
    cancellation: &Cancellation,
) -> Result<Enrollment, EnrollmentError> {
    let today = Utc::now().date_naive();
    let mut connection = pool.get().map_err(DatabaseError::from)?;

    let enrollment = connection.immediate_transaction(|connection| {
        let enrollment = dao::enrollment::find_enrollment(connection, enrollment_id)?
            .ok_or(UnknownEnrollment(enrollment_id))?;
        if !lifecycle::can_cancel(&enrollment, today) {
            Err(NotCancellable)?;
        }

        dao::enrollment::cancel_enrollment(connection, enrollment_id, cancellation.reason())?;
        created_enrollment(connection, enrollment_id)
    })?;

    info!(
        "Enrollment cancelled [enrollment: {enrollment_id}, requested by: {}]",
        cancellation.requested_by()
    );
    notify_if_known(
        &mut connection,
        notification_sink,
        &enrollment,
        "Your enrollment is cancelled",
        &format!("Your enrollment was cancelled: {}", cancellation.reason()),
    )?;

    Ok(enrollment)
}

/// Push an active package enrollment's end date forward.
/// The row already holds its slot, so no capacity check is involved.
pub fn extend_enrollment(
    pool: &DbPool,
    notification_sink: &dyn NotificationSink,
    enrollment_id: i32,
    extension: &Extension,
) -> Result<Enrollment, EnrollmentError> {
    if *extension.months() < 1 {
        return Err(InvalidDuration);
    }

    let mut connection = pool.get().map_err(DatabaseError::from)?;

    let enrollment = connection.immediate_transaction(|connection| {
        let enrollment = dao::enrollment::find_enrollment(connection, enrollment_id)?
            .ok_or(UnknownEnrollment(enrollment_id))?;
        if !lifecycle::can_extend(&enrollment) {
            Err(NotExtendable)?;
        }

        let new_end_date = enrollment
            .end_date()
            .checked_add_months(Months::new(*extension.months()))
            .ok_or(InvalidDuration)?;
        dao::enrollment::update_enrollment_end_date(connection, enrollment_id, new_end_date)?;

        created_enrollment(connection, enrollment_id)
    })?;

    info!(
        "Enrollment extended [enrollment: {enrollment_id}, months: {}]",
        extension.months()
    );
    notify_if_known(
        &mut connection,
        notification_sink,
        &enrollment,
        "Your package is extended",
        &format!("Your package now runs until {}.", enrollment.end_date()),
    )?;

    Ok(enrollment)
}

/// Resolve a pending enrollment with the payment gateway's verdict.
///
/// The slot was reserved when the row was written, so a successful payment
/// only flips the status. Gateways redeliver their callbacks; a confirmation
/// that matches the state the row is already in is acknowledged silently.
pub fn confirm_payment(
    pool: &DbPool,
    notification_sink: &dyn NotificationSink,
    confirmation: &PaymentConfirmation,
) -> Result<Enrollment, EnrollmentError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;

    let (enrollment, transitioned) = connection.immediate_transaction(|connection| {
        let enrollment = dao::enrollment::find_enrollment_by_payment_reference(
            connection,
            confirmation.payment_reference(),
        )?
        .ok_or_else(|| UnknownPaymentReference(confirmation.payment_reference().clone()))?;

        let settled_status = if *confirmation.succeeded() {
            EnrollmentStatus::Active
        } else {
            EnrollmentStatus::Cancelled
        };
        if *enrollment.status() == settled_status {
            return Ok((enrollment, false));
        }
        if !lifecycle::can_activate(&enrollment) {
            Err(NotAwaitingPayment)?;
        }

        if *confirmation.succeeded() {
            dao::enrollment::update_enrollment_status(
                connection,
                *enrollment.id(),
                EnrollmentStatus::Active,
            )?;
        } else {
            dao::enrollment::cancel_enrollment(
                connection,
                *enrollment.id(),
                "The payment didn't go through.",
            )?;
        }

        Ok::<_, EnrollmentError>((created_enrollment(connection, *enrollment.id())?, true))
    })?;

    if transitioned {
        info!(
            "Payment resolved [enrollment: {}, succeeded: {}]",
            enrollment.id(),
            confirmation.succeeded()
        );
        let (subject, body) = if *confirmation.succeeded() {
            (
                "Payment received",
                format!("Your payment went through, you're in until {}.", enrollment.end_date()),
            )
        } else {
            (
                "Payment failed",
                "Your payment didn't go through, the reservation was released.".to_owned(),
            )
        };
        notify_if_known(
            &mut connection,
            notification_sink,
            &enrollment,
            subject,
            &body,
        )?;
    }

    Ok(enrollment)
}

/// Flip over-age ACTIVE enrollments to EXPIRED. Safe to run redundantly:
/// a second pass over the same data finds nothing left to expire.
pub fn expire_outdated_enrollments(
    pool: &DbPool,
    notification_sink: &dyn NotificationSink,
) -> Result<usize, EnrollmentError> {
    let today = Utc::now().date_naive();
    let mut connection = pool.get().map_err(DatabaseError::from)?;

    let expired = connection.immediate_transaction(|connection| {
        let expiring = dao::enrollment::find_expiring_enrollments(connection, today)?;
        dao::enrollment::expire_enrollments(connection, today)?;
        Ok::<_, EnrollmentError>(expiring)
    })?;

    if !expired.is_empty() {
        info!("Expired {} enrollments", expired.len());
    }
    for enrollment in &expired {
        notify_if_known(
            &mut connection,
            notification_sink,
            enrollment,
            "Your enrollment has ended",
            &format!(
                "Your enrollment ended on {}. We'd love to see you again!",
                enrollment.end_date()
            ),
        )?;
    }

    Ok(expired.len())
}

/// Cancel PENDING_PAYMENT rows older than the payment timeout,
/// releasing the slots they were holding.
pub fn cancel_stale_pending_enrollments(
    pool: &DbPool,
    notification_sink: &dyn NotificationSink,
    timeout: Duration,
) -> Result<usize, EnrollmentError> {
    let cutoff = Utc::now().naive_local() - timeout;
    let mut connection = pool.get().map_err(DatabaseError::from)?;

    let abandoned = connection.immediate_transaction(|connection| {
        let stale = dao::enrollment::find_stale_pending_enrollments(connection, cutoff)?;
        for enrollment in &stale {
            dao::enrollment::cancel_enrollment(
                connection,
                *enrollment.id(),
                "The payment wasn't completed in time.",
            )?;
        }
        Ok::<_, EnrollmentError>(stale)
    })?;

    if !abandoned.is_empty() {
        info!("Cancelled {} stale pending enrollments", abandoned.len());
    }
    for enrollment in &abandoned {
        notify_if_known(
            &mut connection,
            notification_sink,
            enrollment,
            "Your reservation expired",
            "We didn't receive your payment in time, the reservation was released.",
        )?;
    }

    Ok(abandoned.len())
}

fn checked_member(
    connection: &mut SqliteConnection,
    member_id: i32,
) -> Result<Member, EnrollmentError> {
    let member =
        dao::member::find_member(connection, member_id)?.ok_or(UnknownMember(member_id))?;
    if !member.active() {
        Err(InactiveMember(member_id))?;
    }

    Ok(member)
}

fn new_enrollment_record(
    member: &Member,
    package_id: Option<i32>,
    class_id: Option<i32>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    paid_up_front: bool,
) -> NewEnrollment {
    let (status, payment_reference) = if paid_up_front {
        (EnrollmentStatus::Active, None)
    } else {
        (
            EnrollmentStatus::PendingPayment,
            Some(Uuid::new_v4().to_string()),
        )
    };

    NewEnrollment {
        member_id: *member.id(),
        package_id,
        class_id,
        start_date,
        end_date,
        status,
        created_at: Utc::now().naive_local(),
        payment_reference,
    }
}

fn created_enrollment(
    connection: &mut SqliteConnection,
    enrollment_id: i32,
) -> Result<Enrollment, EnrollmentError> {
    dao::enrollment::find_enrollment(connection, enrollment_id)?
        .ok_or(UnknownEnrollment(enrollment_id))
}

fn notify_if_known(
    connection: &mut SqliteConnection,
    notification_sink: &dyn NotificationSink,
    enrollment: &Enrollment,
    subject: &str,
    body: &str,
) -> Result<(), EnrollmentError> {
    match dao::member::find_member(connection, *enrollment.member_id())? {
        Some(member) => notification_sink.notify(&member, subject, body),
        None => warn!(
            "Can't notify unknown member [member: {}, enrollment: {}]",
            enrollment.member_id(),
            enrollment.id()
        ),
    }

    Ok(())
}
