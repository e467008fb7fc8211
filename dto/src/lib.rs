pub mod booking;
pub mod class_offering;
pub mod enrollment;
pub mod enrollment_status;
pub mod member;
pub mod package_offering;
pub mod registration;
pub mod weekday_set;
