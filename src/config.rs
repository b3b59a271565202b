//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. explicit path (if provided)
//! 2. `~/.promred/config.toml` (user)
//! 3. `/etc/promred/config.toml` (system)
//!
//! Every field is optional; [`Config::default`] reproduces the built-in
//! prefixes.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bootstrap::BackendKind;
use crate::{PromredError, Result};

/// Instrumentation configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Application prefix prepended to every metric name, joined with `_`.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub prefixes: PrefixConfig,
}

/// Per-backend metric name prefixes. Unset entries use
/// [`BackendKind::default_prefix`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrefixConfig {
    #[serde(default)]
    pub http_client: Option<String>,
    #[serde(default)]
    pub handler: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub stream: Option<String>,
}

impl PrefixConfig {
    fn get(&self, kind: BackendKind) -> Option<&str> {
        match kind {
            BackendKind::HttpClient => self.http_client.as_deref(),
            BackendKind::Handler => self.handler.as_deref(),
            BackendKind::Store => self.store.as_deref(),
            BackendKind::Queue => self.queue.as_deref(),
            BackendKind::Publisher => self.publisher.as_deref(),
            BackendKind::Stream => self.stream.as_deref(),
        }
    }
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.promred/config.toml`
    /// 3. `/etc/promred/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        let content = fs::read_to_string(&path).map_err(|e| {
            PromredError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            PromredError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PromredError::Configuration(e.to_string()))
    }

    /// Full metric name prefix for `kind`, including the namespace.
    pub fn prefix_for(&self, kind: BackendKind) -> String {
        let prefix = self
            .prefixes
            .get(kind)
            .unwrap_or_else(|| kind.default_prefix());
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{ns}_{prefix}"),
            _ => prefix.to_string(),
        }
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(PromredError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".promred").join("config.toml");
            if user_config.exists() {
                return Ok(user_config);
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/promred/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }

        Err(PromredError::Configuration(
            "No config file found. Create ~/.promred/config.toml or /etc/promred/config.toml"
                .to_string(),
        ))
    }
}
