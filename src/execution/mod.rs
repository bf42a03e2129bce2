//! Task execution engine.
//!
//! This module provides the execution infrastructure for running tasks:
//! blocking external command invocation under an explicit execution context.

mod command;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{ExecutionContext, ExitStatus, ProcessRunner, ToolError, ToolRunner};
