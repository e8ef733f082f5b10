//! Configuration module
//!
//! The process-wide mutable flag state of the original gateway scripts is
//! re-expressed here as one immutable `ClientConfig` resolved up front
//! from CLI flags, `UMS_*` environment variables, and an optional config
//! file, in that order of precedence.

mod env;

pub use env::EnvConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::cli::ConnectArgs;
use crate::models::Domain;

pub const DEFAULT_CONTEXT_ROOT: &str = "/ums";
pub const DEFAULT_DESTINATION: &str = "simpleQ";
pub const DEFAULT_USER: &str = "guest";
pub const DEFAULT_PASSWORD: &str = "guest";

/// Server-side poll timeout sent on receive requests
pub const DEFAULT_TIMEOUT_MS: u64 = 15000;

/// Whole-request HTTP timeout; must exceed the poll timeout so the
/// server, not the client, times a quiet poll out
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration resolution errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No gateway server configured; pass -s <host:port> or set UMS_SERVER")]
    MissingServer,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Immutable connection settings shared by every exchange
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Gateway host:port
    pub server: String,

    /// Context root the gateway is mounted under
    pub context_root: String,

    /// Destination (queue or topic) name
    pub destination: String,

    /// Delivery model of the destination
    pub domain: Domain,

    /// Login user name
    pub user: String,

    /// Login password
    pub password: String,

    /// Server-side poll timeout in milliseconds
    pub timeout_ms: u64,

    /// Whole-request HTTP timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            context_root: DEFAULT_CONTEXT_ROOT.to_string(),
            destination: DEFAULT_DESTINATION.to_string(),
            domain: Domain::Queue,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let config: Self = if path
            .as_ref()
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false)
        {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        Ok(config)
    }

    /// Resolve the effective configuration for one invocation.
    ///
    /// Precedence per field: CLI flag, then environment, then config
    /// file, then built-in default. The server has no default; a missing
    /// server is a usage error.
    pub fn resolve(connect: &ConnectArgs, timeout_flag: Option<u64>) -> Result<Self, ConfigError> {
        let env = EnvConfig::load();

        let file_path = connect
            .config
            .as_ref()
            .map(|p| p.display().to_string())
            .or_else(|| env.config_file.clone());

        let mut config = match file_path {
            Some(path) => ClientConfig::load(&path)?,
            None => ClientConfig::default(),
        };

        if let Some(server) = connect.server.clone().or(env.server) {
            config.server = server;
        }
        if config.server.is_empty() {
            return Err(ConfigError::MissingServer);
        }

        if let Some(destination) = connect.destination.clone().or(env.destination) {
            config.destination = destination;
        }
        if let Some(domain) = connect.domain().or(env.domain) {
            config.domain = domain;
        }
        if let Some(user) = connect.user.clone().or(env.user) {
            config.user = user;
        }
        if let Some(password) = connect.password.clone().or(env.password) {
            config.password = password;
        }
        if let Some(timeout) = timeout_flag.or(env.timeout_ms) {
            config.timeout_ms = timeout;
        }

        Ok(config)
    }

    /// Base URL of the gateway context root
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.server, self.context_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connect(server: Option<&str>) -> ConnectArgs {
        ConnectArgs {
            server: server.map(|s| s.to_string()),
            destination: None,
            queue: false,
            topic: false,
            user: None,
            password: None,
            config: None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.context_root, "/ums");
        assert_eq!(config.destination, "simpleQ");
        assert_eq!(config.user, "guest");
        assert_eq!(config.timeout_ms, 15000);
    }

    #[test]
    fn test_resolve_requires_server() {
        std::env::remove_var("UMS_SERVER");
        std::env::remove_var("UMS_CONFIG");
        let err = ClientConfig::resolve(&connect(None), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingServer));
    }

    #[test]
    fn test_resolve_applies_flags_over_defaults() {
        std::env::remove_var("UMS_CONFIG");
        let mut args = connect(Some("broker:9000"));
        args.destination = Some("orders".to_string());
        args.topic = true;

        let config = ClientConfig::resolve(&args, Some(2500)).unwrap();
        assert_eq!(config.server, "broker:9000");
        assert_eq!(config.destination, "orders");
        assert_eq!(config.domain, Domain::Topic);
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.base_url(), "http://broker:9000/ums");
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        std::fs::write(&path, r#"{"server": "broker:7676", "domain": "topic"}"#).unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.server, "broker:7676");
        assert_eq!(config.domain, Domain::Topic);
        assert_eq!(config.destination, "simpleQ");
    }
}
