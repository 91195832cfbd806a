use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub session_minutes: i64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_url: try_load("DATABASE_URL", "sqlite:studyhall.db?mode=rwc"),
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:8080"),
            session_minutes: try_load("SESSION_MINUTES", "60"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
