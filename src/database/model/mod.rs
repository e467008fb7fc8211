use crate::database::error::DatabaseError;
use chrono::NaiveDateTime;

pub(crate) mod booking;
pub(crate) mod class_offering;
pub(crate) mod enrollment;
pub(crate) mod member;
pub(crate) mod package_offering;

/// Timestamps are stored through [NaiveDateTime]'s `Display`,
/// which separates date and time with a space rather than a `T`.
pub(crate) fn parse_datetime(text: &str) -> Result<NaiveDateTime, DatabaseError> {
    Ok(NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")?)
}
