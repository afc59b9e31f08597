//! Server configuration read from `JOBQ_*` environment variables.

use std::net::{IpAddr, SocketAddr};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG: &str = "info";
const DEFAULT_EVENT_CAPACITY: usize = 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}={value}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Default filter directive; `RUST_LOG` overrides it.
    pub log: String,
    /// Capacity of the job event broadcast channel.
    pub event_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            log: DEFAULT_LOG.to_string(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).and_then(non_empty);

        let host_raw = read("JOBQ_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host_raw
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::invalid("JOBQ_HOST", &host_raw, e))?;

        let port = match read("JOBQ_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("JOBQ_PORT", &raw, e))?,
            None => DEFAULT_PORT,
        };

        let event_capacity = match read("JOBQ_EVENT_CAPACITY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => return Err(ConfigError::invalid("JOBQ_EVENT_CAPACITY", &raw, "must be > 0")),
                Ok(n) => n,
                Err(e) => return Err(ConfigError::invalid("JOBQ_EVENT_CAPACITY", &raw, e)),
            },
            None => DEFAULT_EVENT_CAPACITY,
        };

        let log = read("JOBQ_LOG").unwrap_or_else(|| DEFAULT_LOG.to_string());

        Ok(Self {
            host,
            port,
            log,
            event_capacity,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
