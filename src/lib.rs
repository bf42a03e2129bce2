//! botctl - a development-task orchestrator for the trading-bot repository.
//!
//! Exposes a closed set of named tasks (Setup, Lint, Format, Test, Backtest,
//! Run, Hook, Clean). Every task first bootstraps an isolated virtualenv,
//! idempotently, then delegates synchronously to external tools; the
//! delegated tool's exit status becomes the orchestrator's own.
//!
//! Strictly single-process, single-task and sequential: no queuing, no
//! parallelism, no timeouts, no retries. Concurrent invocations against the
//! same virtualenv directory are not synchronized; the tool assumes
//! single-user interactive use.

pub mod config;
pub mod core;
pub mod environment;
pub mod execution;
pub mod tasks;

pub use config::{Config, ConfigError};
pub use crate::core::{InvalidTaskError, InvocationParams, OrchestratorError, Task};
pub use environment::{Ensurer, EnvironmentError};
pub use execution::{ExecutionContext, ExitStatus, ProcessRunner, ToolError, ToolRunner};
pub use tasks::dispatch;
