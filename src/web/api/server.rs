use crate::database::DbPool;
use crate::notification::NotificationSink;
use crate::web::api::{
    bookings_controller, catalog_controller, enrollments_controller, payments_controller,
};
use crate::web::server::Server;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub struct ApiServer {
    pool: DbPool,
    notification_sink: Arc<dyn NotificationSink>,
}

impl ApiServer {
    pub fn new(pool: DbPool, notification_sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            pool,
            notification_sink,
        }
    }
}

impl Server for ApiServer {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build
            .manage(self.pool.clone())
            .manage(Arc::clone(&self.notification_sink))
            .mount(
                "/api/",
                routes![
                    enrollments_controller::register_package,
                    enrollments_controller::register_class,
                    enrollments_controller::cancel_enrollment,
                    enrollments_controller::extend_enrollment,
                    payments_controller::confirm_payment,
                    bookings_controller::book_session,
                    bookings_controller::cancel_booking,
                    bookings_controller::mark_attended,
                    bookings_controller::available_slots,
                    bookings_controller::can_book,
                    catalog_controller::create_class_offering,
                    catalog_controller::get_class_offering,
                    catalog_controller::list_class_offerings,
                    catalog_controller::create_package_offering,
                    catalog_controller::get_package_offering,
                    catalog_controller::list_package_offerings,
                ],
            )
    }
}
