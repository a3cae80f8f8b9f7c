//! Configuration for the `webac` binary.
//!
//! Loaded from TOML. The file is located by, in order: the `--config`
//! flag, the `WEBAC_CONFIG` environment variable, then
//! `<config dir>/webac/config.toml`. A missing file yields the defaults.
//! `WEBAC_*` environment variables override individual settings.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use webac_acl::{AuthorizerConfig, DefaultPolicy};
use webac_core::AgentRef;

use crate::error::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "WEBAC_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebacConfig {
    /// Dataset used when a command is not given `--dataset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Per-lookup budget in milliseconds.
    pub lookup_timeout_ms: u64,

    /// Authorization settings.
    pub authorizer: AuthorizerConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g., "warn", "webac_acl=debug").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for WebacConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            lookup_timeout_ms: 2_000,
            authorizer: AuthorizerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl WebacConfig {
    /// Load configuration, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed, or an
    /// override has an invalid value.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                log::debug!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Where the config file is looked for.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::default_config_path()
    }

    /// The platform default config location.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("webac").join("config.toml"))
    }

    /// Apply `WEBAC_*` overrides read through `lookup`.
    ///
    /// Recognised: `WEBAC_DATASET`, `WEBAC_LOOKUP_TIMEOUT_MS`,
    /// `WEBAC_PARTITION_ROOT`, `WEBAC_DEFAULT_POLICY`,
    /// `WEBAC_ADMINISTRATORS` (comma-separated WebIDs), `WEBAC_MAX_DEPTH`,
    /// `WEBAC_CACHE_ENABLED` and `WEBAC_LOG_LEVEL`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dataset) = lookup("WEBAC_DATASET") {
            self.dataset = Some(PathBuf::from(dataset));
        }
        if let Some(ms) = lookup("WEBAC_LOOKUP_TIMEOUT_MS") {
            self.lookup_timeout_ms = parse_env("WEBAC_LOOKUP_TIMEOUT_MS", &ms)?;
        }
        if let Some(root) = lookup("WEBAC_PARTITION_ROOT") {
            self.authorizer.partition_root = Some(root.into());
        }
        if let Some(policy) = lookup("WEBAC_DEFAULT_POLICY") {
            self.authorizer.default_policy = match policy.trim() {
                "deny_all" => DefaultPolicy::DenyAll,
                "grant_all" => DefaultPolicy::GrantAll,
                "administrators_only" => DefaultPolicy::AdministratorsOnly {
                    administrators: BTreeSet::new(),
                },
                other => {
                    return Err(Error::config(format!(
                        "WEBAC_DEFAULT_POLICY: unknown policy '{other}'"
                    )));
                }
            };
        }
        if let Some(list) = lookup("WEBAC_ADMINISTRATORS") {
            let administrators = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(AgentRef::web_id)
                .collect();
            self.authorizer.default_policy = DefaultPolicy::AdministratorsOnly { administrators };
        }
        if let Some(depth) = lookup("WEBAC_MAX_DEPTH") {
            self.authorizer.max_depth = parse_env("WEBAC_MAX_DEPTH", &depth)?;
        }
        if let Some(enabled) = lookup("WEBAC_CACHE_ENABLED") {
            self.authorizer.cache_enabled = parse_env("WEBAC_CACHE_ENABLED", &enabled)?;
        }
        if let Some(level) = lookup("WEBAC_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// The per-lookup budget.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::config(format!("{key}: invalid value '{value}': {e}")))
}
