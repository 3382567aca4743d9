use std::net::IpAddr;

use axum::http::HeaderValue;

/// Which [`EventStore`](hooklog_core::store::EventStore) backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process-local store; events are lost on restart.
    Memory,
}

/// Invalid or missing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields except `DATABASE_URL` have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted webhook body in bytes (default: 25 MiB, GitHub's cap).
    pub max_body_bytes: usize,
    /// Event store backend (default: `postgres`).
    pub store: StoreBackend,
    /// PostgreSQL connection string. Required for the Postgres backend.
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_WEBHOOK_BODY_BYTES` | `26214400`               |
    /// | `EVENT_STORE`          | `postgres`                 |
    /// | `DATABASE_URL`         | (none)                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host_raw = var("HOST", "0.0.0.0");
        let host = host_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "HOST",
            expected: "an IP address",
            value: host_raw.clone(),
        })?;

        let port_raw = var("PORT", "3000");
        let port = port_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "PORT",
            expected: "a valid u16",
            value: port_raw.clone(),
        })?;

        let cors_origins = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    expected: "a comma-separated list of origins",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let timeout_raw = var("REQUEST_TIMEOUT_SECS", "30");
        let request_timeout_secs = timeout_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "REQUEST_TIMEOUT_SECS",
            expected: "a valid u64",
            value: timeout_raw.clone(),
        })?;

        let body_limit_raw = var("MAX_WEBHOOK_BODY_BYTES", "26214400");
        let max_body_bytes = body_limit_raw
            .parse()
            .ok()
            .filter(|limit: &usize| *limit > 0)
            .ok_or_else(|| ConfigError::Invalid {
                var: "MAX_WEBHOOK_BODY_BYTES",
                expected: "a positive byte count",
                value: body_limit_raw.clone(),
            })?;

        let store = match var("EVENT_STORE", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    var: "EVENT_STORE",
                    expected: "one of: postgres, memory",
                    value: other.to_string(),
                })
            }
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            store,
            database_url,
        })
    }
}
