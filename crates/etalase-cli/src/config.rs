//! Configuration for the Etalase CLI and server.
//!
//! Provides the [`EtalaseConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `ETALASE_CONFIG` environment variable
//! 3. XDG default: `~/.config/etalase/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use confyg::{env, Confygery};
use etalase_core::traits::ConfigProvider;
use etalase_core::util::paths::expand_tilde;
use etalase_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Environment variable prefix and config directory name.
pub const ENV_PREFIX: &str = "ETALASE";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for an Etalase site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EtalaseConfig {
    /// Project name, shown in logs and `version` output.
    pub project_name: String,

    /// Base path for site data. Defaults to the working directory.
    pub base_path: Option<String>,

    /// Content repository configuration.
    pub content: ContentConfig,

    /// HTTP server configuration.
    pub server: ServerConfig,
}

/// Content repository configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root; defaults to `<base_path>/content`.
    pub root: Option<String>,

    /// Document file extension, without the dot.
    pub extension: String,

    /// Seconds a loaded directory stays cached; `0` disables caching.
    pub cache_ttl_secs: u64,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// Host address to bind to.
    pub host: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for EtalaseConfig {
    fn default() -> Self {
        Self {
            project_name: "etalase".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: None,
            extension: "md".to_string(),
            cache_ttl_secs: 0,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl EtalaseConfig {
    /// Load configuration, layering the config file (when present) and
    /// `ETALASE_*` environment variables over the built-in defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut layers = Confygery::new().map_err(confyg_error("setup"))?;

        let file = Self::resolve_config_path(config_path).filter(|p| p.is_file());
        if let Some(file) = &file {
            log::debug!("reading config from {}", file.display());
            layers
                .add_file(&file.to_string_lossy())
                .map_err(confyg_error("file"))?;
        }

        let mut overlay = env::Options::with_top_level(ENV_PREFIX);
        for section in ["content", "server"] {
            overlay.add_section(section);
        }
        layers.add_env(overlay).map_err(confyg_error("environment"))?;

        layers.build().map_err(confyg_error("merge"))
    }

    /// The config file to read: `explicit`, else `$ETALASE_CONFIG`, else the
    /// XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("ETALASE_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// `~/.config/etalase/config.toml` on Linux; the platform equivalent elsewhere.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("etalase").join("config.toml"))
    }

    /// How long loaded content stays cached.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.content.cache_ttl_secs)
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// This config as the TOML written by `config init`.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// `(ETALASE_SECTION_KEY, value)` pairs that reproduce this config
    /// through the environment overlay. Unset optional keys are omitted.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let tree = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        Ok(env_pairs(ENV_PREFIX, &tree))
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for EtalaseConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_root(&self) -> Result<PathBuf> {
        match &self.content.root {
            Some(p) => Ok(expand_tilde(p)),
            None => Ok(self.base_path()?.join("content")),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn confyg_error<E: std::fmt::Display>(stage: &'static str) -> impl Fn(E) -> Error {
    move |e| Error::config(format!("config {stage}: {e}"))
}

fn env_pairs(prefix: &str, value: &toml::Value) -> Vec<(String, String)> {
    let rendered = match value {
        toml::Value::Table(table) => {
            return table
                .iter()
                .flat_map(|(key, child)| {
                    env_pairs(&format!("{prefix}_{}", key.to_uppercase()), child)
                })
                .collect();
        }
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => match serde_json::to_string(items) {
            Ok(json) => json,
            Err(_) => return Vec::new(),
        },
        other => other.to_string(),
    };
    vec![(prefix.to_string(), rendered)]
}

// ============================================================================
// Tests
// ============================================================================
