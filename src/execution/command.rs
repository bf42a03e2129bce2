//! External-tool invocation.
//!
//! Every subprocess the orchestrator launches goes through [`ToolRunner`]
//! with an explicit [`ExecutionContext`], in place of shell-style
//! environment activation. Stdio passes through to the caller's terminal;
//! the call blocks until the tool exits.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// An external tool could not be launched (missing binary, permissions).
///
/// A tool that launched and exited nonzero is not a `ToolError`; that
/// outcome is carried in [`ExitStatus`].
#[derive(Debug, Error)]
#[error("failed to launch '{program}': {source}")]
pub struct ToolError {
    /// The program that failed to start.
    pub program: String,
    #[source]
    pub source: std::io::Error,
}

/// Exit status of one delegated tool, as the orchestrator reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(i32);

impl ExitStatus {
    /// The zero (success) status.
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Wrap a raw exit code.
    pub fn from_code(code: i32) -> Self {
        ExitStatus(code)
    }

    /// The raw exit code.
    pub fn code(self) -> i32 {
        self.0
    }

    /// Whether the tool exited with status zero.
    pub fn success(self) -> bool {
        self.0 == 0
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        // A signal-terminated child has no code; report a plain failure.
        ExitStatus(status.code().unwrap_or(1))
    }
}

/// Where a tool runs: on the host as-is, or with a virtualenv's binaries
/// preferred over system-wide ones.
///
/// The venv form prepends the environment's bin directory to `PATH`, sets
/// `VIRTUAL_ENV` and clears `PYTHONHOME`, which is what shell activation
/// does without mutating this process's own environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    venv_dir: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
}

impl ExecutionContext {
    /// A context with no overrides, for tools that must run before the
    /// virtualenv exists.
    pub fn host() -> Self {
        Self::default()
    }

    /// A context equivalent to activating the virtualenv at `venv_dir`.
    pub fn for_venv(venv_dir: impl Into<PathBuf>) -> Self {
        let venv_dir = venv_dir.into();
        let bin_dir = venv_dir.join(if cfg!(windows) { "Scripts" } else { "bin" });
        ExecutionContext {
            venv_dir: Some(venv_dir),
            bin_dir: Some(bin_dir),
        }
    }

    /// Whether this context prefers a virtualenv's binaries.
    pub fn is_venv(&self) -> bool {
        self.venv_dir.is_some()
    }

    /// The virtualenv bin directory, if any.
    pub fn bin_dir(&self) -> Option<&Path> {
        self.bin_dir.as_deref()
    }

    /// Apply this context's search-path and environment overrides to a
    /// command about to be spawned.
    pub(crate) fn apply(&self, cmd: &mut Command) {
        let (venv_dir, bin_dir) = match (&self.venv_dir, &self.bin_dir) {
            (Some(venv), Some(bin)) => (venv, bin),
            _ => return,
        };
        let path = std::env::var_os("PATH").unwrap_or_default();
        let mut paths = vec![bin_dir.clone()];
        paths.extend(std::env::split_paths(&path));
        if let Ok(joined) = std::env::join_paths(paths) {
            cmd.env("PATH", joined);
        }
        cmd.env("VIRTUAL_ENV", venv_dir);
        cmd.env_remove("PYTHONHOME");
    }
}

/// Runs a named external program with arguments, blocking until it exits.
///
/// Handlers compose exclusively through this trait, so tests can observe
/// invocations without spawning processes.
pub trait ToolRunner {
    /// Run `program` with `args` under `ctx` and wait for it to exit.
    fn run(
        &self,
        ctx: &ExecutionContext,
        program: &str,
        args: &[&str],
    ) -> Result<ExitStatus, ToolError>;
}

/// The process-backed runner used outside of tests.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(
        &self,
        ctx: &ExecutionContext,
        program: &str,
        args: &[&str],
    ) -> Result<ExitStatus, ToolError> {
        debug!(program, ?args, in_venv = ctx.is_venv(), "running external tool");
        let mut cmd = Command::new(program);
        cmd.args(args);
        ctx.apply(&mut cmd);
        let status = cmd.status().map_err(|source| ToolError {
            program: program.to_string(),
            source,
        })?;
        Ok(status.into())
    }
}
