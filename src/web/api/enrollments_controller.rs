use crate::database::DbPool;
use crate::enrollment;
use crate::enrollment::error::EnrollmentError;
use crate::notification::NotificationSink;
use crate::tools::retry_once_if;
use dto::enrollment::Enrollment;
use dto::registration::{Cancellation, ClassRegistration, Extension, PackageRegistration};
use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use std::sync::Arc;

#[post(
    "/enrollments/package",
    format = "application/json",
    data = "<registration>"
)]
pub async fn register_package(
    pool: &State<DbPool>,
    notification_sink: &State<Arc<dyn NotificationSink>>,
    registration: Json<PackageRegistration>,
) -> Result<Json<Enrollment>, Custom<String>> {
    let registration = registration.into_inner();
    retry_once_if(EnrollmentError::is_transient, || {
        enrollment::register_package(pool.inner(), notification_sink.inner().as_ref(), &registration)
    })
    .map(Json)
    .map_err(to_response)
}

#[post(
    "/enrollments/class",
    format = "application/json",
    data = "<registration>"
)]
pub async fn register_class(
    pool: &State<DbPool>,
    notification_sink: &State<Arc<dyn NotificationSink>>,
    registration: Json<ClassRegistration>,
) -> Result<Json<Enrollment>, Custom<String>> {
    let registration = registration.into_inner();
    retry_once_if(EnrollmentError::is_transient, || {
        enrollment::register_class(pool.inner(), notification_sink.inner().as_ref(), &registration)
    })
    .map(Json)
    .map_err(to_response)
}

#[post(
    "/enrollments/<enrollment_id>/cancel",
    format = "application/json",
    data = "<cancellation>"
)]
pub async fn cancel_enrollment(
    pool: &State<DbPool>,
    notification_sink: &State<Arc<dyn NotificationSink>>,
    enrollment_id: i32,
    cancellation: Json<Cancellation>,
) -> Result<Json<Enrollment>, Custom<String>> {
    let cancellation = cancellation.into_inner();
    retry_once_if(EnrollmentError::is_transient, || {
        enrollment::cancel_enrollment(
            pool.inner(),
            notification_sink.inner().as_ref(),
            enrollment_id,
            &cancellation,
        )
    })
    .map(Json)
    .map_err(to_response)
}

#[post(
    "/enrollments/<enrollment_id>/extend",
    format = "application/json",
    data = "<extension>"
)]
pub async fn extend_enrollment(
    pool: &State<DbPool>,
    notification_sink: &State<Arc<dyn NotificationSink>>,
    enrollment_id: i32,
    extension: Json<Extension>,
) -> Result<Json<Enrollment>, Custom<String>> {
    let extension = extension.into_inner();
    retry_once_if(EnrollmentError::is_transient, || {
        enrollment::extend_enrollment(
            pool.inner(),
            notification_sink.inner().as_ref(),
            enrollment_id,
            &extension,
        )
    })
    .map(Json)
    .map_err(to_response)
}

/// Business rejections keep their own message so the member learns why;
/// infrastructure hiccups all collapse into one generic "try again".
pub(super) fn to_response(error: EnrollmentError) -> Custom<String> {
    if error.is_transient() {
        return Custom(
            Status::ServiceUnavailable,
            "The service is briefly unavailable, please try again.".to_owned(),
        );
    }
    if error.is_business_rejection() {
        return Custom(Status::Conflict, error.to_string());
    }
    if error.is_invalid_input() {
        return Custom(Status::BadRequest, error.to_string());
    }
    error!("{error:#?}");
    Custom(
        Status::InternalServerError,
        "Something went wrong, please try again later.".to_owned(),
    )
}
