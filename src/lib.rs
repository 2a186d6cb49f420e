pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod forward;
pub mod index;
pub mod types;
pub mod webhook;

use rocket::{Build, Rocket, catchers, routes};

use config::Config;
use forward::SharedForwarder;

/// Assembles the server. The config and forwarder are shared read-only by all requests.
pub fn build_rocket(config: Config, forwarder: SharedForwarder) -> Rocket<Build> {
    rocket::build()
        .manage(config)
        .manage(forwarder)
        .mount("/", routes![index::index, webhook::webhook_handler])
        .register("/", catchers![error::default_catcher])
}
