//! Server configuration loaded from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | `postgres://localhost/noteful` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000` |
//! | `DB_MAX_CONNECTIONS` | `10` |

use std::net::SocketAddr;

use axum::http::HeaderValue;
use noteful_core::{Error, Result};

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/noteful";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Comma-separated list of origins allowed by CORS.
    pub allowed_origins: String,
    pub db_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            allowed_origins: lookup("ALLOWED_ORIGINS").unwrap_or(defaults.allowed_origins),
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.db_max_connections),
        }
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid HOST/PORT: {}", e)))
    }

    /// Parse `allowed_origins` into header values, skipping invalid entries.
    pub fn cors_origins(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.trim().is_empty() {
            return vec![HeaderValue::from_static(DEFAULT_ALLOWED_ORIGINS)];
        }

        self.allowed_origins
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<HeaderValue>() {
                    Ok(v) => Some(v),
                    Err(e) => {
                        tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                        None
                    }
                }
            })
            .collect()
    }
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
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/notes"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9001"),
            ("DB_MAX_CONNECTIONS", "3"),
        ]));
        assert_eq!(config.database_url, "postgres://db/notes");
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9001");
        assert_eq!(config.db_max_connections, 3);
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_bad_host_is_config_error() {
        let config = ServerConfig::from_lookup(lookup_from(&[("HOST", "not a host")]));
        assert!(matches!(config.bind_addr(), Err(Error::Config(_))));
    }

    #[test]
    fn test_cors_origins_split_and_trimmed() {
        let config = ServerConfig::from_lookup(lookup_from(&[(
            "ALLOWED_ORIGINS",
            "http://a.test, http://b.test,,",
        )]));
        let origins = config.cors_origins();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1].to_str().unwrap(), "http://b.test");
    }

    #[test]
    fn test_blank_cors_origins_use_default() {
        let config = ServerConfig::from_lookup(lookup_from(&[("ALLOWED_ORIGINS", "  ")]));
        let origins = config.cors_origins();
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0].to_str().unwrap(), DEFAULT_ALLOWED_ORIGINS);
    }
}
