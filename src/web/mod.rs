use crate::database::DbPool;
use crate::notification::NotificationSink;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub(crate) mod api;
mod server;

pub fn start_server(pool: DbPool, notification_sink: Arc<dyn NotificationSink>) -> Rocket<Build> {
    server::build_server(pool, notification_sink)
}
