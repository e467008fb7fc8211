use crate::database::DbPool;
use crate::notification::NotificationSink;
use crate::tools::env_args::retrieve_arg_value;
use crate::web::api::server::ApiServer;
use rocket::{Build, Rocket};
use std::sync::Arc;

const PORT_ARG: &str = "--port";
const DEFAULT_PORT: i32 = 8000;

pub trait Server {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build>;
}

pub fn build_server(pool: DbPool, notification_sink: Arc<dyn NotificationSink>) -> Rocket<Build> {
    let api_port = get_api_port();
    let rocket_build =
        rocket::build().configure(rocket::Config::figment().merge(("port", api_port)));

    let servers: Vec<Box<dyn Server>> = vec![Box::new(ApiServer::new(pool, notification_sink))];
    servers
        .iter()
        .fold(rocket_build, |rocket_build, server| {
            server.configure(rocket_build)
        })
}

fn get_api_port() -> i32 {
    retrieve_arg_value(PORT_ARG)
        .map(|port| port.parse::<i32>().ok())
        .unwrap_or(None)
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use crate::tools::env_args::with_env_args;
    use crate::web::server::{DEFAULT_PORT, PORT_ARG, get_api_port};

    #[test]
    fn should_get_custom_api_port() {
        let expected_api_port = 10;
        let api_port = with_env_args(
            vec![format!("{PORT_ARG}={expected_api_port}")],
            get_api_port,
        );

        assert_eq!(expected_api_port, api_port);
    }

    #[test]
    fn should_get_default_api_port_when_wrong_type() {
        let api_port = with_env_args(vec![format!("{PORT_ARG}=doe")], get_api_port);

        assert_eq!(DEFAULT_PORT, api_port);
    }

    #[test]
    fn should_get_default_api_port_when_no_arg() {
        let api_port = with_env_args(vec![], get_api_port);

        assert_eq!(DEFAULT_PORT, api_port);
    }
}
