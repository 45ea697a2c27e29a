//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the listen address, the database URL and the token signing secret, all read
//! from the process environment.

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: try_load(&lookup, "PORT", "2000")?,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: try_load(&lookup, "DATABASE_MAX_CONNECTIONS", "10")?,
            jwt_secret: lookup("JWT_SECRET")
                .filter(|secret| !secret.is_empty())
                .ok_or(ConfigError::Missing("JWT_SECRET"))?,
            jwt_ttl_hours: ttl_hours(try_load(&lookup, "JWT_TTL_HOURS", "24")?)?,
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Token lifetimes are capped at one year.
pub const MAX_JWT_TTL_HOURS: i64 = 24 * 365;

fn ttl_hours(hours: i64) -> Result<i64, ConfigError> {
    if (1..=MAX_JWT_TTL_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(ConfigError::Invalid {
            key: "JWT_TTL_HOURS",
            value: hours.to_string(),
            reason: format!("must be between 1 and {MAX_JWT_TTL_HOURS}"),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.port, 2000);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.jwt_ttl_hours, 24);
        assert!(config.database_url.is_none());
        assert_eq!(config.listen_address(), "0.0.0.0:2000");
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_port_is_reported() {
        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "x"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_token_ttl_is_bounded() {
        for raw in ["0", "-5", "9223372036854775807"] {
            let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "x"), ("JWT_TTL_HOURS", raw)]))
                .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "JWT_TTL_HOURS", .. }), "{raw}");
        }

        let config =
            Config::from_lookup(lookup_from(&[("JWT_SECRET", "x"), ("JWT_TTL_HOURS", "8760")]))
                .unwrap();
        assert_eq!(config.jwt_ttl_hours, MAX_JWT_TTL_HOURS);
    }

    #[test]
    fn test_blank_database_url_means_memory() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "x"),
            ("DATABASE_URL", "  "),
        ]))
        .unwrap();
        assert!(config.database_url.is_none());
    }
}
