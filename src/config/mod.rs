//! Configuration loading and parsing.
//!
//! This module provides TOML-based configuration for the orchestrator:
//! the interpreter and virtualenv locations, the bot entry point, the
//! backtest report script and the Clean target list. Configuration can be
//! loaded from:
//! 1. An explicit path specified via --config flag
//! 2. The XDG config directory (~/.config/botctl/config.toml)
//! 3. Fall back to defaults
//!
//! Never put secrets in the config file; the bot's credentials live in the
//! repository's `.env` file, which this tool only checks for existence.

mod error;
mod file;

pub use error::ConfigError;
pub use file::{BacktestConfig, CleanConfig, Config, EnvironmentConfig, RunConfig};
