use std::net::Ipv4Addr;
use std::sync::Arc;

use shopping_list::{build_rocket, config::Config, forward::HttpForwarder};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env();
    info!("Loaded {config:?}");

    let forwarder = match HttpForwarder::new(config.webhook_timeout) {
        Ok(forwarder) => forwarder,
        Err(e) => {
            error!("Failed to build webhook client: {e}");
            std::process::exit(1);
        }
    };

    let port = config.port;
    info!("Shopping list server will start on port {port}");

    let _rocket = build_rocket(config, Arc::new(forwarder))
        .configure(rocket::Config {
            port,
            address: Ipv4Addr::UNSPECIFIED.into(),
            ..rocket::Config::default()
        })
        .launch()
        .await?;

    info!("Server shut down");
    Ok(())
}
