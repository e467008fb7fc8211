use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Request to register a member to a package.
/// When `months` is absent, the package's own duration applies.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct PackageRegistration {
    member_id: i32,
    package_id: i32,
    months: Option<u32>,
    paid_up_front: bool,
}

impl PackageRegistration {
    pub fn new(member_id: i32, package_id: i32, months: Option<u32>, paid_up_front: bool) -> Self {
        Self {
            member_id,
            package_id,
            months,
            paid_up_front,
        }
    }
}

/// Request to register a member to a class for a date range.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct ClassRegistration {
    member_id: i32,
    class_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    paid_up_front: bool,
}

impl ClassRegistration {
    pub fn new(
        member_id: i32,
        class_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        paid_up_front: bool,
    ) -> Self {
        Self {
            member_id,
            class_id,
            start_date,
            end_date,
            paid_up_front,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Cancellation {
    requested_by: i32,
    reason: String,
}

impl Cancellation {
    pub fn new(requested_by: i32, reason: String) -> Self {
        Self {
            requested_by,
            reason,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Extension {
    months: u32,
}

impl Extension {
    pub fn new(months: u32) -> Self {
        Self { months }
    }
}

/// The payment gateway's signal for a pending enrollment:
/// an opaque reference and whether the payment went through.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct PaymentConfirmation {
    payment_reference: String,
    succeeded: bool,
}

impl PaymentConfirmation {
    pub fn new(payment_reference: String, succeeded: bool) -> Self {
        Self {
            payment_reference,
            succeeded,
        }
    }
}

/// Request to reserve one concrete session of a class.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct BookingRequest {
    member_id: i32,
    class_id: i32,
    session_date: NaiveDate,
}

impl BookingRequest {
    pub fn new(member_id: i32, class_id: i32, session_date: NaiveDate) -> Self {
        Self {
            member_id,
            class_id,
            session_date,
        }
    }
}
