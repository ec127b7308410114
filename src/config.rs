use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub weather_api_key: Option<String>,
    pub request_log_path: Option<PathBuf>,
    pub fetch_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("FETCH_TIMEOUT_SECS must be a positive integer")]
    InvalidFetchTimeout,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = non_blank("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());
        let bind_port = non_blank("BIND_PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8080);
        let fetch_timeout_secs = non_blank("FETCH_TIMEOUT_SECS")
            .map(|value| {
                value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidFetchTimeout)
            })
            .transpose()?
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);

        let config = Self {
            bind_addr,
            bind_port,
            weather_api_key: non_blank("OPENWEATHER_API_KEY"),
            request_log_path: non_blank("REQUEST_LOG_PATH").map(PathBuf::from),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}
