//! TOML configuration parsing.
//!
//! Every section is optional and defaultable; a missing config file is not
//! an error. Paths are interpreted relative to the working directory, which
//! is expected to be the repository root.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigError;

/// Environment bootstrap settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnvironmentConfig {
    /// Interpreter used to create the virtualenv (default: python3).
    #[serde(default = "default_python")]
    pub python: String,

    /// Virtualenv directory (default: .venv).
    #[serde(default = "default_venv_dir")]
    pub venv_dir: PathBuf,

    /// Dependency manifest installed when present (default: requirements.txt).
    #[serde(default = "default_requirements")]
    pub requirements: PathBuf,
}

fn default_python() -> String {
    "python3".to_string()
}

fn default_venv_dir() -> PathBuf {
    PathBuf::from(".venv")
}

fn default_requirements() -> PathBuf {
    PathBuf::from("requirements.txt")
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            venv_dir: default_venv_dir(),
            requirements: default_requirements(),
        }
    }
}

/// Settings for the Run task.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    /// Bot entry point (default: bot.py).
    #[serde(default = "default_entry_point")]
    pub entry_point: PathBuf,

    /// Local secrets file whose absence only warns (default: .env).
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,
}

fn default_entry_point() -> PathBuf {
    PathBuf::from("bot.py")
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            entry_point: default_entry_point(),
            env_file: default_env_file(),
        }
    }
}

/// Settings for the Backtest task.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BacktestConfig {
    /// Report script invoked with --csv/--out (default: scripts/backtest.py).
    #[serde(default = "default_backtest_script")]
    pub script: PathBuf,
}

fn default_backtest_script() -> PathBuf {
    PathBuf::from("scripts/backtest.py")
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            script: default_backtest_script(),
        }
    }
}

/// Settings for the Clean task.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanConfig {
    /// Directories removed recursively when present.
    #[serde(default = "default_clean_targets")]
    pub targets: Vec<PathBuf>,
}

fn default_clean_targets() -> Vec<PathBuf> {
    vec![
        PathBuf::from(".pytest_cache"),
        PathBuf::from(".mypy_cache"),
        PathBuf::from(".ruff_cache"),
        PathBuf::from("bridge_out/reports"),
    ]
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            targets: default_clean_targets(),
        }
    }
}

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Environment bootstrap settings.
    pub environment: EnvironmentConfig,

    /// Run task settings.
    pub run: RunConfig,

    /// Backtest task settings.
    pub backtest: BacktestConfig,

    /// Clean task settings.
    pub clean: CleanConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
                path: path.clone(),
                source,
            })?;
        let config: Config =
            toml::from_str(&contents).map_err(|source| ConfigError::TomlParse {
                path: path.clone(),
                source,
            })?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/botctl/config.toml).
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("botctl");
            path.push("config.toml");
            path
        })
    }

    /// Load configuration with priority:
    /// 1. Explicit config path if provided
    /// 2. XDG config path if it exists
    /// 3. Default configuration
    pub fn load(explicit_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            return Self::from_file(&path);
        }

        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}
