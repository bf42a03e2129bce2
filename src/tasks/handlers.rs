//! One handler per task.
//!
//! Each handler is a short, fixed sequence of external-tool invocations run
//! under the bootstrapped execution context. Handlers compose exclusively
//! through [`ToolRunner`]; the only filesystem work done directly is
//! Clean's directory removal.

use tracing::{info, warn};

use crate::config::{BacktestConfig, CleanConfig, RunConfig};
use crate::core::InvocationParams;
use crate::execution::{ExecutionContext, ExitStatus, ToolError, ToolRunner};

/// Developer tooling installed by Setup.
const DEV_TOOLS: [&str; 5] = ["ruff", "black", "mypy", "pytest", "pre-commit"];

/// Lint checkers, in the order they report.
const LINT_CHECKS: [(&str, &[&str]); 3] = [
    ("ruff", &["check", "."]),
    ("black", &["--check", "."]),
    ("mypy", &["."]),
];

/// Formatters, in the order they rewrite sources. No rollback on partial
/// formatting.
const FORMATTERS: [(&str, &[&str]); 2] =
    [("black", &["."]), ("ruff", &["check", "--fix", "."])];

/// Install the developer tool set and the repository's pre-commit hook.
/// The first nonzero status short-circuits and is surfaced.
pub(crate) fn setup<R: ToolRunner>(
    ctx: &ExecutionContext,
    runner: &R,
) -> Result<ExitStatus, ToolError> {
    let mut args = vec!["-m", "pip", "install"];
    args.extend(DEV_TOOLS);
    let status = runner.run(ctx, "python", &args)?;
    if !status.success() {
        return Ok(status);
    }

    let status = runner.run(ctx, "pre-commit", &["install"])?;
    if status.success() {
        info!("setup complete");
    }
    Ok(status)
}

/// Run every checker even after a failure so all issues are reported in one
/// pass; the first nonzero status is the one surfaced.
pub(crate) fn lint<R: ToolRunner>(
    ctx: &ExecutionContext,
    runner: &R,
) -> Result<ExitStatus, ToolError> {
    run_all(ctx, runner, &LINT_CHECKS)
}

/// Rewrite sources in place with the style formatter and the
/// static-analysis auto-fixer.
pub(crate) fn format<R: ToolRunner>(
    ctx: &ExecutionContext,
    runner: &R,
) -> Result<ExitStatus, ToolError> {
    run_all(ctx, runner, &FORMATTERS)
}

/// Run the test suite in quiet mode; its status passes through verbatim.
pub(crate) fn test<R: ToolRunner>(
    ctx: &ExecutionContext,
    runner: &R,
) -> Result<ExitStatus, ToolError> {
    runner.run(ctx, "pytest", &["-q"])
}

/// Invoke the backtest report script. Path existence is the script's
/// problem, not ours.
pub(crate) fn backtest<R: ToolRunner>(
    ctx: &ExecutionContext,
    runner: &R,
    config: &BacktestConfig,
    params: &InvocationParams,
) -> Result<ExitStatus, ToolError> {
    let script = config.script.to_string_lossy();
    let csv = params.csv_path();
    let out = params.out_path();
    let csv = csv.to_string_lossy();
    let out = out.to_string_lossy();
    runner.run(
        ctx,
        "python",
        &[
            script.as_ref(),
            "--csv",
            csv.as_ref(),
            "--out",
            out.as_ref(),
        ],
    )
}

/// Launch the bot entry point. A missing secrets file is a warning, not an
/// error, so the bot can be inspected or dry-run without credentials.
pub(crate) fn run<R: ToolRunner>(
    ctx: &ExecutionContext,
    runner: &R,
    config: &RunConfig,
) -> Result<ExitStatus, ToolError> {
    if !config.env_file.exists() {
        warn!(
            "{} not found; starting without local secrets",
            config.env_file.display()
        );
    }
    let entry = config.entry_point.to_string_lossy();
    runner.run(ctx, "python", &[entry.as_ref()])
}

/// Run all configured pre-commit checks across the whole tree.
pub(crate) fn hook<R: ToolRunner>(
    ctx: &ExecutionContext,
    runner: &R,
) -> Result<ExitStatus, ToolError> {
    runner.run(
        ctx,
        "pre-commit",
        &["run", "--all-files", "--show-diff-on-failure"],
    )
}

/// Remove the cache and report directories. The one handler that suppresses
/// failures: "already clean" is a success state, so missing targets are
/// silent and other removal errors only warn.
pub(crate) fn clean(config: &CleanConfig) -> ExitStatus {
    for target in &config.targets {
        match std::fs::remove_dir_all(target) {
            Ok(()) => info!("removed {}", target.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!("could not remove {}: {}", target.display(), err),
        }
    }
    ExitStatus::SUCCESS
}

/// Run a fixed tool sequence to completion, surfacing the first nonzero
/// status once every tool has reported.
fn run_all<R: ToolRunner>(
    ctx: &ExecutionContext,
    runner: &R,
    tools: &[(&str, &[&str])],
) -> Result<ExitStatus, ToolError> {
    let mut first_failure = None;
    for &(program, args) in tools {
        let status = runner.run(ctx, program, args)?;
        if !status.success() && first_failure.is_none() {
            first_failure = Some(status);
        }
    }
    Ok(first_failure.unwrap_or(ExitStatus::SUCCESS))
}
