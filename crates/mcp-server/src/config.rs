//! Server configuration from the environment, with an optional `.env` file loaded first.

use sp_api_client::{Credentials, DEFAULT_ENDPOINT, DEFAULT_LWA_ENDPOINT};
use std::env;
use thiserror::Error;

pub const DEFAULT_SERVER_NAME: &str = "Selling Partner MCP Server";
pub const DEFAULT_SERVER_VERSION: &str = "0.1.0";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("SP-API credentials are partially configured; provide all values or none")]
    PartialCredentials,

    #[error("failed to read .env file: {0}")]
    DotEnv(#[from] dotenv::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_name: String,
    pub server_version: String,
    /// Overrides the built-in instructions when set.
    pub instructions: Option<String>,
    pub endpoint: String,
    pub lwa_endpoint: String,
    pub credentials: Option<Credentials>,
    pub verbose: bool,
}

impl Config {
    /// Load `.env` (a missing file is fine) and read the process environment.
    pub fn load() -> Result<Self> {
        match dotenv::dotenv() {
            Ok(path) => log::debug!("loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err.into()),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Values are trimmed; blank means unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let credentials = match (
            get("SP_API_CLIENT_ID"),
            get("SP_API_CLIENT_SECRET"),
            get("SP_API_REFRESH_TOKEN"),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => Some(Credentials {
                client_id,
                client_secret,
                refresh_token,
            }),
            (None, None, None) => None,
            _ => return Err(ConfigError::PartialCredentials),
        };

        Ok(Self {
            server_name: get("MCP_SERVER_NAME").unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            server_version: get("MCP_SERVER_VERSION")
                .unwrap_or_else(|| DEFAULT_SERVER_VERSION.to_string()),
            instructions: get("MCP_SERVER_INSTRUCTIONS"),
            endpoint: get("SP_API_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            lwa_endpoint: get("SP_API_LWA_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_LWA_ENDPOINT.to_string()),
            credentials,
            verbose: get("VERBOSE").is_some_and(|value| parse_flag(&value)),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
