use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    PendingPayment,
    Active,
    Expired,
    Cancelled,
}

impl EnrollmentStatus {
    /// Whether the enrollment holds a capacity slot.
    /// Rows awaiting payment hold their slot so that two reservations
    /// can't both win the last place while neither has paid yet.
    pub fn occupies_slot(&self) -> bool {
        matches!(
            self,
            EnrollmentStatus::PendingPayment | EnrollmentStatus::Active
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EnrollmentStatus::Expired | EnrollmentStatus::Cancelled)
    }
}

impl Display for EnrollmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            EnrollmentStatus::PendingPayment => "PENDING_PAYMENT",
            EnrollmentStatus::Active => "ACTIVE",
            EnrollmentStatus::Expired => "EXPIRED",
            EnrollmentStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{token}")
    }
}

impl FromStr for EnrollmentStatus {
    type Err = ParseEnrollmentStatusError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "PENDING_PAYMENT" => Ok(EnrollmentStatus::PendingPayment),
            "ACTIVE" => Ok(EnrollmentStatus::Active),
            "EXPIRED" => Ok(EnrollmentStatus::Expired),
            "CANCELLED" => Ok(EnrollmentStatus::Cancelled),
            _ => Err(ParseEnrollmentStatusError(token.to_owned())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("'{0}' isn't a known enrollment status.")]
pub struct ParseEnrollmentStatusError(pub String);
