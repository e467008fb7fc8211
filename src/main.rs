mod booking;
mod capacity;
mod catalog;
mod database;
mod enrollment;
mod error;
mod notification;
mod schedule;
mod tools;
mod web;

#[macro_use]
extern crate log;
#[macro_use]
extern crate rocket;

use crate::database::DbPool;
use crate::error::Result;
use crate::notification::NotificationSink;
use rocket::fairing::AdHoc;
use std::sync::Arc;

const EXPIRY_SWEEP_INTERVAL_IN_SECONDS: u64 = 3600;
const PENDING_PAYMENT_TIMEOUT_IN_MINUTES: i64 = 30;

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let pool = match database::init_db() {
        Ok(pool) => pool,
        Err(error) => {
            error!("Can't initialize the database, aborting...\n{error:#?}");
            panic!();
        }
    };
    let notification_sink = notification::build_notification_sink();

    let sweep_pool = pool.clone();
    let sweep_sink = Arc::clone(&notification_sink);
    web::start_server(pool, notification_sink).attach(AdHoc::on_liftoff(
        "Maintenance sweeps",
        |_| {
            Box::pin(async move {
                start_maintenance_sweeps(sweep_pool, sweep_sink);
            })
        },
    ))
}

/// Expiry and payment-timeout sweeps. Both are idempotent, so a missed or
/// doubled tick changes nothing.
fn start_maintenance_sweeps(pool: DbPool, notification_sink: Arc<dyn NotificationSink>) {
    rocket::tokio::spawn(async move {
        let mut interval = rocket::tokio::time::interval(std::time::Duration::from_secs(
            EXPIRY_SWEEP_INTERVAL_IN_SECONDS,
        ));
        loop {
            interval.tick().await;
            if let Err(error) = run_sweeps(&pool, notification_sink.as_ref()) {
                error!("Maintenance sweep failed\n{error:#?}");
            }
        }
    });
}

fn run_sweeps(pool: &DbPool, notification_sink: &dyn NotificationSink) -> Result<()> {
    enrollment::expire_outdated_enrollments(pool, notification_sink)?;
    enrollment::cancel_stale_pending_enrollments(
        pool,
        notification_sink,
        chrono::Duration::minutes(PENDING_PAYMENT_TIMEOUT_IN_MINUTES),
    )?;

    Ok(())
}
