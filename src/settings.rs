//! Runtime settings from environment variables.

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/beer_catalog";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Run CREATE DATABASE when the target database is missing.
    pub create_database: bool,
}

impl Settings {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `DATABASE_MAX_CONNECTIONS` and `CREATE_DATABASE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = parse("BIND_ADDR", lookup("BIND_ADDR"), DEFAULT_BIND_ADDR.parse().ok())?;
        let max_connections = parse(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            Some(DEFAULT_MAX_CONNECTIONS),
        )?;
        let create_database = parse("CREATE_DATABASE", lookup("CREATE_DATABASE"), Some(true))?;
        Ok(Settings {
            database_url,
            bind_addr,
            max_connections,
            create_database,
        })
    }
}

fn parse<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => default.ok_or(ConfigError::InvalidValue {
            key,
            value: String::new(),
        }),
    }
}
