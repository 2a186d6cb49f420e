use std::{env, fmt, time::Duration};

use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process configuration, loaded once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub admin_password: Option<String>,
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let config = Self {
            port: parse_or("PORT", DEFAULT_PORT),
            admin_password: non_empty("ADMIN_PASSWORD"),
            webhook_url: non_empty("WEBHOOK_URL"),
            webhook_timeout: Duration::from_secs(parse_or(
                "WEBHOOK_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        };

        if config.admin_password.is_none() {
            warn!("ADMIN_PASSWORD is not set, every webhook request will fail");
        }
        if config.webhook_url.is_none() {
            warn!("WEBHOOK_URL is not set, every webhook request will fail");
        }

        config
    }

    /// The secret and destination, or `None` if either is missing.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.admin_password.as_deref()?, self.webhook_url.as_deref()?))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<redacted>"))
            .field("webhook_url", &self.webhook_url.as_ref().map(|_| "<redacted>"))
            .field("webhook_timeout", &self.webhook_timeout)
            .finish()
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid {key} value {raw:?}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
