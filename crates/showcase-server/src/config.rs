//! Server configuration.
//!
//! Layered through the `config` crate: built-in defaults, then an optional
//! YAML file, then `SHOWCASE_*` environment variables (`__` separates
//! nested keys, e.g. `SHOWCASE_GITHUB__API_URL`).

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use showcase_github::GitHubConfig;
use std::net::SocketAddr;
use std::path::Path;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "SHOWCASE";

/// Configuration for the showcase server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listen address.
    pub listen_addr: SocketAddr,
    /// Log level.
    pub log_level: String,
    /// Log format (`pretty` or `json`).
    pub log_format: String,
    /// Upstream API settings.
    pub github: GitHubConfig,
    /// Session cookie settings.
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            github: GitHubConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie holding the upstream credential.
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "gh_token".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        Self::build(builder, environment())
    }

    fn build(
        builder: ConfigBuilder<DefaultState>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        builder.add_source(env).build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
