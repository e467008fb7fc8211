use crate::enrollment_status::EnrollmentStatus;
use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A standing registration of a member to a package or a class for a date range.
/// Exactly one of `package_id`/`class_id` is set; the kind is derived from which one.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Enrollment {
    id: i32,
    member_id: i32,
    package_id: Option<i32>,
    class_id: Option<i32>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: EnrollmentStatus,
    created_at: NaiveDateTime,
    cancellation_reason: Option<String>,
    payment_reference: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum EnrollmentKind {
    Package,
    Class,
}

impl Enrollment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        member_id: i32,
        package_id: Option<i32>,
        class_id: Option<i32>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: EnrollmentStatus,
        created_at: NaiveDateTime,
        cancellation_reason: Option<String>,
        payment_reference: Option<String>,
    ) -> Self {
        Self {
            id,
            member_id,
            package_id,
            class_id,
            start_date,
            end_date,
            status,
            created_at,
            cancellation_reason,
            payment_reference,
        }
    }

    pub fn kind(&self) -> EnrollmentKind {
        if self.class_id.is_some() {
            EnrollmentKind::Class
        } else {
            EnrollmentKind::Package
        }
    }

    /// Whether the enrollment still holds a capacity slot as of the given day.
    pub fn occupies_slot_on(&self, day: NaiveDate) -> bool {
        self.status.occupies_slot() && self.end_date >= day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment_with(
        package_id: Option<i32>,
        class_id: Option<i32>,
        status: EnrollmentStatus,
        end_date: NaiveDate,
    ) -> Enrollment {
        Enrollment {
            id: 1,
            member_id: 1,
            package_id,
            class_id,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            end_date,
            status,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 6)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            cancellation_reason: None,
            payment_reference: None,
        }
    }

    #[test]
    fn should_derive_kind_from_references() {
        let end_date = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        let package = enrollment_with(Some(4), None, EnrollmentStatus::Active, end_date);
        let class = enrollment_with(None, Some(7), EnrollmentStatus::Active, end_date);

        assert_eq!(EnrollmentKind::Package, package.kind());
        assert_eq!(EnrollmentKind::Class, class.kind());
    }

    #[test]
    fn should_occupy_slot_while_pending_or_active_and_unexpired() {
        let end_date = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        let day_before = end_date.pred_opt().unwrap();
        let day_after = end_date.succ_opt().unwrap();

        let active = enrollment_with(None, Some(7), EnrollmentStatus::Active, end_date);
        let pending = enrollment_with(None, Some(7), EnrollmentStatus::PendingPayment, end_date);
        let cancelled = enrollment_with(None, Some(7), EnrollmentStatus::Cancelled, end_date);

        assert!(active.occupies_slot_on(day_before));
        assert!(active.occupies_slot_on(end_date));
        assert!(!active.occupies_slot_on(day_after));
        assert!(pending.occupies_slot_on(end_date));
        assert!(!cancelled.occupies_slot_on(day_before));
    }
}
