use crate::database::DbPool;
use crate::enrollment;
use crate::enrollment::error::EnrollmentError;
use crate::notification::NotificationSink;
use crate::tools::retry_once_if;
use crate::web::api::enrollments_controller::to_response;
use dto::enrollment::Enrollment;
use dto::registration::PaymentConfirmation;
use rocket::State;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use std::sync::Arc;

/// Called by the payment gateway once it has settled a payment.
/// Whatever protocol and signature checks the gateway integration performs
/// happen upstream; by the time the call lands here it is a plain verdict.
#[post(
    "/payments/confirm",
    format = "application/json",
    data = "<confirmation>"
)]
pub async fn confirm_payment(
    pool: &State<DbPool>,
    notification_sink: &State<Arc<dyn NotificationSink>>,
    confirmation: Json<PaymentConfirmation>,
) -> Result<Json<Enrollment>, Custom<String>> {
    let confirmation = confirmation.into_inner();
    retry_once_if(EnrollmentError::is_transient, || {
        enrollment::confirm_payment(
            pool.inner(),
            notification_sink.inner().as_ref(),
            &confirmation,
        )
    })
    .map(Json)
    .map_err(to_response)
}
