use crate::booking;
use crate::booking::error::BookingError;
use crate::database::DbPool;
use crate::notification::NotificationSink;
use crate::tools::retry_once_if;
use chrono::NaiveDate;
use dto::booking::Booking;
use dto::registration::BookingRequest;
use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use std::str::FromStr;
use std::sync::Arc;

#[post("/bookings", format = "application/json", data = "<request>")]
pub async fn book_session(
    pool: &State<DbPool>,
    notification_sink: &State<Arc<dyn NotificationSink>>,
    request: Json<BookingRequest>,
) -> Result<Json<Booking>, Custom<String>> {
    let request = request.into_inner();
    retry_once_if(BookingError::is_transient, || {
        booking::book_session(pool.inner(), notification_sink.inner().as_ref(), &request)
    })
    .map(Json)
    .map_err(to_response)
}

#[post("/bookings/<booking_id>/cancel")]
pub async fn cancel_booking(
    pool: &State<DbPool>,
    notification_sink: &State<Arc<dyn NotificationSink>>,
    booking_id: i32,
) -> Result<Json<Booking>, Custom<String>> {
    retry_once_if(BookingError::is_transient, || {
        booking::cancel_booking(pool.inner(), notification_sink.inner().as_ref(), booking_id)
    })
    .map(Json)
    .map_err(to_response)
}

#[post("/bookings/<booking_id>/attended")]
pub async fn mark_attended(
    pool: &State<DbPool>,
    booking_id: i32,
) -> Result<Json<Booking>, Custom<String>> {
    retry_once_if(BookingError::is_transient, || {
        booking::mark_attended(pool.inner(), booking_id)
    })
    .map(Json)
    .map_err(to_response)
}

#[get("/classes/<class_id>/slots?<date>")]
pub async fn available_slots(
    pool: &State<DbPool>,
    class_id: i32,
    date: &str,
) -> Result<Json<i32>, Custom<String>> {
    let session_date = parse_date(date)?;
    booking::available_slots(pool.inner(), class_id, session_date)
        .map(Json)
        .map_err(to_response)
}

#[get("/classes/<class_id>/can-book?<member>&<date>")]
pub async fn can_book(
    pool: &State<DbPool>,
    class_id: i32,
    member: i32,
    date: &str,
) -> Result<Json<bool>, Custom<String>> {
    let session_date = parse_date(date)?;
    booking::can_book(pool.inner(), member, class_id, session_date)
        .map(Json)
        .map_err(to_response)
}

fn parse_date(date: &str) -> Result<NaiveDate, Custom<String>> {
    NaiveDate::from_str(date).map_err(|_| {
        Custom(
            Status::BadRequest,
            format!("'{date}' isn't a valid date, expected YYYY-MM-DD."),
        )
    })
}

fn to_response(error: BookingError) -> Custom<String> {
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
