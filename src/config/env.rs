//! Environment variable configuration
//!
//! Provides environment variable fallbacks for connection settings.

use std::env;

use crate::models::Domain;

/// Environment variable prefix
const ENV_PREFIX: &str = "UMS";

/// Connection settings read from the environment
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Server host:port from UMS_SERVER
    pub server: Option<String>,
    /// Destination name from UMS_DESTINATION
    pub destination: Option<String>,
    /// Domain (queue/topic) from UMS_DOMAIN
    pub domain: Option<Domain>,
    /// User name from UMS_USER
    pub user: Option<String>,
    /// Password from UMS_PASSWORD
    pub password: Option<String>,
    /// Receive poll timeout in milliseconds from UMS_TIMEOUT
    pub timeout_ms: Option<u64>,
    /// Config file path from UMS_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load settings from environment variables
    pub fn load() -> Self {
        Self {
            server: get_env("SERVER"),
            destination: get_env("DESTINATION"),
            domain: get_env("DOMAIN").and_then(|v| Domain::from_str(&v)),
            user: get_env("USER"),
            password: get_env("PASSWORD"),
            timeout_ms: get_env_parse("TIMEOUT"),
            config_file: get_env("CONFIG"),
        }
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_environment_yields_defaults() {
        std::env::remove_var("UMS_SERVER");
        std::env::remove_var("UMS_DOMAIN");
        let config = EnvConfig::load();
        assert!(config.server.is_none());
        assert!(config.domain.is_none());
    }
}
