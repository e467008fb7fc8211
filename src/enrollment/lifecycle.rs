use chrono::NaiveDate;
use dto::enrollment::{Enrollment, EnrollmentKind};
use dto::enrollment_status::EnrollmentStatus;

/// Whether the enrollment may move to CANCELLED.
///
/// Rows awaiting payment can always be abandoned. Active package enrollments
/// can be cancelled at will; active class enrollments only while their start
/// date is still ahead, so nobody walks out on a class about to run.
/// Terminal rows stay where they are.
pub(crate) fn can_cancel(enrollment: &Enrollment, today: NaiveDate) -> bool {
    match enrollment.status() {
        EnrollmentStatus::PendingPayment => true,
        EnrollmentStatus::Active => match enrollment.kind() {
            EnrollmentKind::Package => true,
            EnrollmentKind::Class => *enrollment.start_date() > today,
        },
        EnrollmentStatus::Expired | EnrollmentStatus::Cancelled => false,
    }
}

/// PENDING_PAYMENT -> ACTIVE is the only activation. The capacity slot was
/// already reserved when the row was written, so none is re-reserved here.
pub(crate) fn can_activate(enrollment: &Enrollment) -> bool {
    matches!(enrollment.status(), EnrollmentStatus::PendingPayment)
}

pub(crate) fn can_extend(enrollment: &Enrollment) -> bool {
    matches!(enrollment.status(), EnrollmentStatus::Active)
        && enrollment.kind() == EnrollmentKind::Package
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Utc};
    use parameterized::{ide, parameterized};

    ide!();

    fn enrollment(
        package_id: Option<i32>,
        class_id: Option<i32>,
        status: EnrollmentStatus,
        start_date: NaiveDate,
    ) -> Enrollment {
        let end_date = start_date.checked_add_days(Days::new(90)).unwrap();
        Enrollment::new(
            1,
            1,
            package_id,
            class_id,
            start_date,
            end_date,
            status,
            Utc::now().naive_local(),
            None,
            None,
        )
    }

    mod can_cancel {
        use super::*;

        #[test]
        fn class_starting_tomorrow_can_be_cancelled() {
            let today = Utc::now().date_naive();
            let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
            let subject = enrollment(None, Some(7), EnrollmentStatus::Active, tomorrow);

            assert!(can_cancel(&subject, today));
        }

        #[test]
        fn class_starting_today_can_not_be_cancelled() {
            let today = Utc::now().date_naive();
            let subject = enrollment(None, Some(7), EnrollmentStatus::Active, today);

            assert!(!can_cancel(&subject, today));
        }

        #[test]
        fn active_package_can_always_be_cancelled() {
            let today = Utc::now().date_naive();
            let started_long_ago = today.checked_sub_days(Days::new(30)).unwrap();
            let subject = enrollment(Some(4), None, EnrollmentStatus::Active, started_long_ago);

            assert!(can_cancel(&subject, today));
        }

        #[test]
        fn pending_class_can_be_abandoned_even_on_start_day() {
            let today = Utc::now().date_naive();
            let subject = enrollment(None, Some(7), EnrollmentStatus::PendingPayment, today);

            assert!(can_cancel(&subject, today));
        }

        #[parameterized(
            status = {EnrollmentStatus::Expired, EnrollmentStatus::Cancelled}
        )]
        fn terminal_states_stay_terminal(status: EnrollmentStatus) {
            let today = Utc::now().date_naive();
            let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
            let subject = enrollment(Some(4), None, status, tomorrow);

            assert!(!can_cancel(&subject, today));
        }
    }

    mod can_activate {
        use super::*;

        #[parameterized(
            status = {
                EnrollmentStatus::PendingPayment,
                EnrollmentStatus::Active,
                EnrollmentStatus::Expired,
                EnrollmentStatus::Cancelled,
            },
            expected_result = {true, false, false, false}
        )]
        fn only_from_pending_payment(status: EnrollmentStatus, expected_result: bool) {
            let today = Utc::now().date_naive();
            let subject = enrollment(Some(4), None, status, today);

            assert_eq!(expected_result, can_activate(&subject));
        }
    }

    mod can_extend {
        use super::*;

        #[test]
        fn active_package_can_be_extended() {
            let today = Utc::now().date_naive();
            let subject = enrollment(Some(4), None, EnrollmentStatus::Active, today);

            assert!(can_extend(&subject));
        }

        #[test]
        fn class_enrollment_can_not_be_extended() {
            let today = Utc::now().date_naive();
            let subject = enrollment(None, Some(7), EnrollmentStatus::Active, today);

            assert!(!can_extend(&subject));
        }

        #[test]
        fn pending_package_can_not_be_extended() {
            let today = Utc::now().date_naive();
            let subject = enrollment(Some(4), None, EnrollmentStatus::PendingPayment, today);

            assert!(!can_extend(&subject));
        }
    }
}
