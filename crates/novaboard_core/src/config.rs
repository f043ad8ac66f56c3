//! Application configuration.
//!
//! # Responsibility
//! - Load settings from an optional JSON file with per-field defaults.
//! - Apply environment overrides for user identity, storage key and API key.
//!
//! # Invariants
//! - A missing config file yields defaults, not an error.
//! - Blank environment values never override file values.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_STORAGE_KEY: &str = "novaboard_projects_v1";
pub const DEFAULT_DATABASE_PATH: &str = "novaboard.sqlite3";
pub const DEFAULT_CURRENT_USER: &str = "Unassigned";
pub const DEFAULT_SUMMARY_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-4o-mini";

pub const ENV_CURRENT_USER: &str = "NOVABOARD_CURRENT_USER";
pub const ENV_STORAGE_KEY: &str = "NOVABOARD_STORAGE_KEY";
pub const ENV_API_KEY: &str = "NOVABOARD_API_KEY";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Owner name used by "my focus" filtering and quick-add.
    pub current_user: String,
    /// Key the project list is persisted under.
    pub storage_key: String,
    pub database_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rotated log files; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub summary: SummaryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            current_user: DEFAULT_CURRENT_USER.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
            summary: SummaryConfig::default(),
        }
    }
}

/// Chat completions endpoint settings for executive summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub endpoint: String,
    pub model: String,
    /// Usually supplied through `NOVABOARD_API_KEY` instead of the file.
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SUMMARY_ENDPOINT.to_string(),
            model: DEFAULT_SUMMARY_MODEL.to_string(),
            api_key: None,
            temperature: 0.3,
            max_tokens: 1024,
        }
    }
}

impl AppConfig {
    /// Reads `path` as JSON; a missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`, which maps variable names to values.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(user) = non_blank(ENV_CURRENT_USER) {
            self.current_user = user;
        }
        if let Some(key) = non_blank(ENV_STORAGE_KEY) {
            self.storage_key = key;
        }
        if let Some(api_key) = non_blank(ENV_API_KEY) {
            self.summary.api_key = Some(api_key);
        }
    }
}
