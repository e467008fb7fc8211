use super::Result;
use crate::database::model::class_offering::ClassOffering;
use crate::database::model::enrollment::{Enrollment, NewEnrollment};
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use dto::enrollment_status::EnrollmentStatus;

/// Statuses whose rows hold a capacity slot (see [EnrollmentStatus::occupies_slot]).
fn occupying_statuses() -> Vec<String> {
    vec![
        EnrollmentStatus::PendingPayment.to_string(),
        EnrollmentStatus::Active.to_string(),
    ]
}

pub(crate) fn insert_enrollment(
    connection: &mut SqliteConnection,
    record: &NewEnrollment,
) -> Result<i32> {
    use crate::database::schema::enrollment;

    let inserted_id = diesel::insert_into(enrollment::table)
        .values((
            enrollment::member_id.eq(record.member_id),
            enrollment::package_id.eq(record.package_id),
            enrollment::class_id.eq(record.class_id),
            enrollment::start_date.eq(record.start_date.to_string()),
            enrollment::end_date.eq(record.end_date.to_string()),
            enrollment::status.eq(record.status.to_string()),
            enrollment::created_at.eq(record.created_at.to_string()),
            enrollment::payment_reference.eq(record.payment_reference.clone()),
        ))
        .returning(enrollment::id)
        .get_result(connection)?;

    Ok(inserted_id)
}

pub(crate) fn find_enrollment(
    connection: &mut SqliteConnection,
    enrollment_id: i32,
) -> Result<Option<dto::enrollment::Enrollment>> {
    use crate::database::schema::enrollment;

    let result = enrollment::table
        .find(enrollment_id)
        .select(Enrollment::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::enrollment::Enrollment::try_from).transpose()
}

pub(crate) fn find_enrollment_by_payment_reference(
    connection: &mut SqliteConnection,
    reference: &str,
) -> Result<Option<dto::enrollment::Enrollment>> {
    use crate::database::schema::enrollment;

    let result = enrollment::table
        .filter(enrollment::payment_reference.eq(reference))
        .select(Enrollment::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::enrollment::Enrollment::try_from).transpose()
}

/// The number of slot-holding enrollments of a class as of the given day.
/// Authoritative only inside the write transaction that performs the insert.
pub(crate) fn count_occupying_class_enrollments(
    connection: &mut SqliteConnection,
    class_offering_id: i32,
    as_of: NaiveDate,
) -> Result<i64> {
    use crate::database::schema::enrollment;

    let count = enrollment::table
        .filter(enrollment::class_id.eq(class_offering_id))
        .filter(enrollment::status.eq_any(occupying_statuses()))
        .filter(enrollment::end_date.ge(as_of.to_string()))
        .count()
        .get_result(connection)?;

    Ok(count)
}

pub(crate) fn find_occupying_package_enrollments(
    connection: &mut SqliteConnection,
    member_id: i32,
    as_of: NaiveDate,
) -> Result<Vec<dto::enrollment::Enrollment>> {
    use crate::database::schema::enrollment;

    let results = enrollment::table
        .filter(enrollment::member_id.eq(member_id))
        .filter(enrollment::package_id.is_not_null())
        .filter(enrollment::status.eq_any(occupying_statuses()))
        .filter(enrollment::end_date.ge(as_of.to_string()))
        .select(Enrollment::as_select())
        .load(connection)?;

    let mut enrollments = Vec::new();
    for result in results {
        enrollments.push(dto::enrollment::Enrollment::try_from(result)?);
    }

    Ok(enrollments)
}

/// The class offerings behind a member's slot-holding class enrollments,
/// as needed by the schedule conflict check.
pub(crate) fn find_occupying_class_offerings(
    connection: &mut SqliteConnection,
    member_id: i32,
    as_of: NaiveDate,
) -> Result<Vec<dto::class_offering::ClassOffering>> {
    use crate::database::schema::{class_offering, enrollment};

    let results = enrollment::table
        .inner_join(
            class_offering::table.on(class_offering::id.nullable().eq(enrollment::class_id)),
        )
        .filter(enrollment::member_id.eq(member_id))
        .filter(enrollment::status.eq_any(occupying_statuses()))
        .filter(enrollment::end_date.ge(as_of.to_string()))
        .select(ClassOffering::as_select())
        .load(connection)?;

    let mut offerings = Vec::new();
    for result in results {
        offerings.push(dto::class_offering::ClassOffering::try_from(result)?);
    }

    Ok(offerings)
}

pub(crate) fn update_enrollment_status(
    connection: &mut SqliteConnection,
    enrollment_id: i32,
    new_status: EnrollmentStatus,
) -> Result<usize> {
    use crate::database::schema::enrollment;

    let count = diesel::update(enrollment::table.find(enrollment_id))
        .set(enrollment::status.eq(new_status.to_string()))
        .execute(connection)?;

    Ok(count)
}

pub(crate) fn cancel_enrollment(
    connection: &mut SqliteConnection,
    enrollment_id: i32,
    reason: &str,
) -> Result<usize> {
    use crate::database::schema::enrollment;

    let count = diesel::update(enrollment::table.find(enrollment_id))
        .set((
            enrollment::status.eq(EnrollmentStatus::Cancelled.to_string()),
            enrollment::cancellation_reason.eq(reason.to_owned()),
        ))
        .execute(connection)?;

    Ok(count)
}

pub(crate) fn update_enrollment_end_date(
    connection: &mut SqliteConnection,
    enrollment_id: i32,
    new_end_date: NaiveDate,
) -> Result<usize> {
    use crate::database::schema::enrollment;

    let count = diesel::update(enrollment::table.find(enrollment_id))
        .set(enrollment::end_date.eq(new_end_date.to_string()))
        .execute(connection)?;

    Ok(count)
}

pub(crate) fn find_expiring_enrollments(
    connection: &mut SqliteConnection,
    as_of: NaiveDate,
) -> Result<Vec<dto::enrollment::Enrollment>> {
    use crate::database::schema::enrollment;

    let results = enrollment::table
        .filter(enrollment::status.eq(EnrollmentStatus::Active.to_string()))
        .filter(enrollment::end_date.lt(as_of.to_string()))
        .select(Enrollment::as_select())
        .load(connection)?;

    let mut enrollments = Vec::new();
    for result in results {
        enrollments.push(dto::enrollment::Enrollment::try_from(result)?);
    }

    Ok(enrollments)
}

/// Flip every over-age ACTIVE row to EXPIRED. Running it twice is harmless:
/// the second pass matches nothing.
pub(crate) fn expire_enrollments(
    connection: &mut SqliteConnection,
    as_of: NaiveDate,
) -> Result<usize> {
    use crate::database::schema::enrollment;

    let count = diesel::update(
        enrollment::table
            .filter(enrollment::status.eq(EnrollmentStatus::Active.to_string()))
            .filter(enrollment::end_date.lt(as_of.to_string())),
    )
    .set(enrollment::status.eq(EnrollmentStatus::Expired.to_string()))
    .execute(connection)?;

    Ok(count)
}

pub(crate) fn find_stale_pending_enrollments(
    connection: &mut SqliteConnection,
    created_before: NaiveDateTime,
) -> Result<Vec<dto::enrollment::Enrollment>> {
    use crate::database::schema::enrollment;

    let results = enrollment::table
        .filter(enrollment::status.eq(EnrollmentStatus::PendingPayment.to_string()))
        .filter(enrollment::created_at.lt(created_before.to_string()))
        .select(Enrollment::as_select())
        .load(connection)?;

    let mut enrollments = Vec::new();
    for result in results {
        enrollments.push(dto::enrollment::Enrollment::try_from(result)?);
    }

    Ok(enrollments)
}

#[cfg(test)]
mod tests {
    use crate::database::dao::enrollment::insert_enrollment;
    use crate::database::dao::fixtures::{
        class_enrollment_record, insert_class, insert_member, insert_package,
        package_enrollment_record,
    };
    use chrono::{Days, NaiveDate, Utc};
    use diesel::SqliteConnection;
    use dto::class_offering::ClassOffering;
    use dto::class_offering::tests::morning_spin;
    use dto::enrollment_status::EnrollmentStatus;
    use dto::member::Member;
    use dto::member::tests::jon_doe;

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn in_days(days: u64) -> NaiveDate {
        today().checked_add_days(Days::new(days)).unwrap()
    }

    fn populate_class(connection: &mut SqliteConnection) -> (Member, ClassOffering) {
        let member = insert_member(connection, &jon_doe());
        let offering = insert_class(connection, &morning_spin());
        (member, offering)
    }

    mod insert_and_find_enrollment {
        use super::*;
        use crate::database::dao::enrollment::find_enrollment;
        use crate::database::with_temp_database;
        use dto::enrollment::EnrollmentKind;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let (member, offering) = populate_class(&mut connection);

                let record = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::Active,
                );
                let enrollment_id = insert_enrollment(&mut connection, &record).unwrap();

                let result = find_enrollment(&mut connection, enrollment_id)
                    .unwrap()
                    .unwrap();
                assert_eq!(EnrollmentKind::Class, result.kind());
                assert_eq!(member.id(), result.member_id());
                assert_eq!(Some(*offering.id()), *result.class_id());
                assert_eq!(EnrollmentStatus::Active, *result.status());
                assert_eq!(today(), *result.start_date());
                assert_eq!(in_days(30), *result.end_date());
            })
        }

        #[test]
        fn none_when_unknown() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();

                let result = find_enrollment(&mut connection, 42).unwrap();
                assert_eq!(None, result);
            })
        }
    }

    mod count_occupying_class_enrollments {
        use super::*;
        use crate::database::dao::enrollment::count_occupying_class_enrollments;
        use crate::database::with_temp_database;
        use dto::member::tests::jonette_snow;

        #[test]
        fn counts_pending_and_active_rows() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let (member, offering) = populate_class(&mut connection);
                let other_member = insert_member(&mut connection, &jonette_snow());

                let active = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::Active,
                );
                let pending = class_enrollment_record(
                    *other_member.id(),
                    *offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::PendingPayment,
                );
                insert_enrollment(&mut connection, &active).unwrap();
                insert_enrollment(&mut connection, &pending).unwrap();

                let count =
                    count_occupying_class_enrollments(&mut connection, *offering.id(), today())
                        .unwrap();
                assert_eq!(2, count);
            })
        }

        #[test]
        fn ignores_cancelled_expired_and_outdated_rows() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let (member, offering) = populate_class(&mut connection);

                let cancelled = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::Cancelled,
                );
                let expired = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::Expired,
                );
                // Still ACTIVE but its end date has passed: the sweep hasn't run yet.
                let outdated = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today().checked_sub_days(Days::new(60)).unwrap(),
                    today().checked_sub_days(Days::new(1)).unwrap(),
                    EnrollmentStatus::Active,
                );
                insert_enrollment(&mut connection, &cancelled).unwrap();
                insert_enrollment(&mut connection, &expired).unwrap();
                insert_enrollment(&mut connection, &outdated).unwrap();

                let count =
                    count_occupying_class_enrollments(&mut connection, *offering.id(), today())
                        .unwrap();
                assert_eq!(0, count);
            })
        }
    }

    mod find_occupying_class_offerings {
        use super::*;
        use crate::database::dao::enrollment::find_occupying_class_offerings;
        use crate::database::with_temp_database;
        use dto::class_offering::tests::tuesday_yoga;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let (member, offering) = populate_class(&mut connection);
                let other_offering = insert_class(&mut connection, &tuesday_yoga());

                let enrolled = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::Active,
                );
                let cancelled = class_enrollment_record(
                    *member.id(),
                    *other_offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::Cancelled,
                );
                insert_enrollment(&mut connection, &enrolled).unwrap();
                insert_enrollment(&mut connection, &cancelled).unwrap();

                let result =
                    find_occupying_class_offerings(&mut connection, *member.id(), today()).unwrap();
                assert_eq!(vec![offering], result);
            })
        }

        #[test]
        fn ignores_package_enrollments() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let member = insert_member(&mut connection, &jon_doe());
                let package =
                    insert_package(&mut connection, &dto::package_offering::tests::quarterly_pass());

                let record = package_enrollment_record(
                    *member.id(),
                    *package.id(),
                    today(),
                    in_days(90),
                    EnrollmentStatus::Active,
                );
                insert_enrollment(&mut connection, &record).unwrap();

                let result =
                    find_occupying_class_offerings(&mut connection, *member.id(), today()).unwrap();
                assert!(result.is_empty());
            })
        }
    }

    mod expire_enrollments {
        use super::*;
        use crate::database::dao::enrollment::{
            expire_enrollments, find_enrollment, find_expiring_enrollments,
        };
        use crate::database::with_temp_database;

        #[test]
        fn success_and_idempotent() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let (member, offering) = populate_class(&mut connection);

                let outdated = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today().checked_sub_days(Days::new(60)).unwrap(),
                    today().checked_sub_days(Days::new(1)).unwrap(),
                    EnrollmentStatus::Active,
                );
                let current = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::Active,
                );
                let outdated_id = insert_enrollment(&mut connection, &outdated).unwrap();
                let current_id = insert_enrollment(&mut connection, &current).unwrap();

                let expiring = find_expiring_enrollments(&mut connection, today()).unwrap();
                assert_eq!(1, expiring.len());

                assert_eq!(1, expire_enrollments(&mut connection, today()).unwrap());
                assert_eq!(0, expire_enrollments(&mut connection, today()).unwrap());

                let outdated = find_enrollment(&mut connection, outdated_id).unwrap().unwrap();
                let current = find_enrollment(&mut connection, current_id).unwrap().unwrap();
                assert_eq!(EnrollmentStatus::Expired, *outdated.status());
                assert_eq!(EnrollmentStatus::Active, *current.status());
            })
        }
    }

    mod find_stale_pending_enrollments {
        use super::*;
        use crate::database::dao::enrollment::find_stale_pending_enrollments;
        use crate::database::with_temp_database;
        use chrono::Duration;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let (member, offering) = populate_class(&mut connection);

                let mut stale = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::PendingPayment,
                );
                stale.created_at = Utc::now().naive_local() - Duration::hours(2);
                let fresh = class_enrollment_record(
                    *member.id(),
                    *offering.id(),
                    today(),
                    in_days(30),
                    EnrollmentStatus::PendingPayment,
                );
                let stale_id = insert_enrollment(&mut connection, &stale).unwrap();
                insert_enrollment(&mut connection, &fresh).unwrap();

                let cutoff = Utc::now().naive_local() - Duration::hours(1);
                let result = find_stale_pending_enrollments(&mut connection, cutoff).unwrap();
                assert_eq!(1, result.len());
                assert_eq!(stale_id, *result[0].id());
            })
        }
    }
}
