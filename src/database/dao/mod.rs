use crate::database::error::DatabaseError;

pub(crate) mod booking;
pub(crate) mod class_offering;
pub(crate) mod enrollment;
pub(crate) mod member;
pub(crate) mod package_offering;

type Result<T, E = DatabaseError> = std::result::Result<T, E>;
