//! Runtime configuration from environment variables.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_secs: u64,
    pub frontend_origins: Vec<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "5000"),
            jwt_secret: load_secret(),
            jwt_ttl_secs: try_load("JWT_TTL_SECS", "86400"),
            frontend_origins: load_origins(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
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

fn load_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| {
        warn!("JWT_SECRET not set, using insecure default");
        "change-me".to_string()
    })
}

/// `FRONTEND_ORIGIN` takes a comma-separated list of allowed origins.
fn load_origins() -> Vec<String> {
    let raw = env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| {
        info!("FRONTEND_ORIGIN not set, using default: http://localhost:5173");
        "http://localhost:5173".to_string()
    });

    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
