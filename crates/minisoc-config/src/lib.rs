//! Configuration for the minisoc dashboard.
//!
//! Layered loading (defaults, TOML file, `MINISOC_*` environment) and
//! translation to `minisoc_core::DashboardConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use minisoc_core::{DEFAULT_WINDOW_HOURS, DashboardConfig};

/// Largest accepted stats window: one week.
pub const MAX_WINDOW_HOURS: u32 = 168;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub dashboard: Dashboard,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Backend {
    /// Backend host root (e.g., "http://127.0.0.1:8000"). `/api` is appended.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dashboard {
    /// Stats window shared by every panel.
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:8000".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_window_hours() -> u32 {
    DEFAULT_WINDOW_HOURS
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "minisoc").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("minisoc");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from `path` (or the platform default) and environment.
///
/// A missing file is not an error; defaults apply. Nested keys are reached
/// from the environment with a double underscore, e.g.
/// `MINISOC_BACKEND__TIMEOUT_SECS=5`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("MINISOC_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

// ── Validation ──────────────────────────────────────────────────────

impl Config {
    /// Check ranges and the backend URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend_url()?;

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "backend.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }

        let hours = self.dashboard.window_hours;
        if !(1..=MAX_WINDOW_HOURS).contains(&hours) {
            return Err(ConfigError::Validation {
                field: "dashboard.window_hours".into(),
                reason: format!("expected 1..={MAX_WINDOW_HOURS}, got {hours}"),
            });
        }
        Ok(())
    }

    pub fn backend_url(&self) -> Result<Url, ConfigError> {
        let url: Url = self
            .backend
            .url
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "backend.url".into(),
                reason: format!("invalid URL: {}", self.backend.url),
            })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Validation {
                field: "backend.url".into(),
                reason: format!("expected http or https, got '{other}'"),
            }),
        }
    }

    /// Build the core session config.
    pub fn to_dashboard_config(&self) -> Result<DashboardConfig, ConfigError> {
        self.validate()?;
        Ok(DashboardConfig {
            url: self.backend_url()?,
            timeout: Duration::from_secs(self.backend.timeout_secs),
            window_hours: self.dashboard.window_hours,
        })
    }
}
