//! Top-level error taxonomy.
//!
//! A delegated tool that merely exits nonzero is not an error here: its
//! status passes through as the orchestrator's own exit status. This type
//! covers what aborts a task before or instead of that.

use thiserror::Error;

use super::task::InvalidTaskError;
use crate::environment::EnvironmentError;
use crate::execution::ToolError;

/// Anything that aborts a task invocation outright.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The task name was not in the closed set. No tool was invoked.
    #[error(transparent)]
    InvalidTask(#[from] InvalidTaskError),

    /// Environment bootstrap failed before any task-specific work ran.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// An external tool could not be launched at all.
    #[error(transparent)]
    Launch(#[from] ToolError),
}
