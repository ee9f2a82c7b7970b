use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub data_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    /// HERBERG_DATA_PATH defaults to "./herberg.json".
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = std::env::var("HERBERG_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("HERBERG_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let data_path = std::env::var("HERBERG_DATA_PATH")
            .unwrap_or_else(|_| "./herberg.json".to_string())
            .into();

        Ok(Config {
            listen_addr,
            data_path,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
