//! The closed task vocabulary.
//!
//! Tasks are a fixed, validated enumeration. A raw name is checked here
//! before any environment mutation or subprocess launch, so no handler ever
//! observes an invalid task.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Default equity-curve CSV consumed by the Backtest task.
pub const DEFAULT_EQUITY_CSV: &str = "bridge_out/reports/equity_curve.csv";

/// Default plot path written by the Backtest task.
pub const DEFAULT_EQUITY_PLOT: &str = "bridge_out/reports/equity_curve.png";

/// A task name outside the closed set was rejected.
#[derive(Debug, Error)]
#[error("unknown task '{value}', expected one of: {expected}")]
pub struct InvalidTaskError {
    /// The rejected input, verbatim.
    pub value: String,
    /// Comma-separated list of the valid labels.
    pub expected: String,
}

/// One closed, named unit of work the orchestrator can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Install developer tooling and the pre-commit hook.
    Setup,
    /// Run the static-analysis, style and type checkers.
    Lint,
    /// Reformat sources in place.
    Format,
    /// Run the test suite.
    Test,
    /// Produce the backtest report from an equity curve.
    Backtest,
    /// Launch the bot entry point.
    Run,
    /// Run all pre-commit checks across the tree.
    Hook,
    /// Remove tool caches and runtime reports.
    Clean,
}

impl Task {
    /// Every task, in the order shown in help and error text.
    pub const ALL: [Task; 8] = [
        Task::Setup,
        Task::Lint,
        Task::Format,
        Task::Test,
        Task::Backtest,
        Task::Run,
        Task::Hook,
        Task::Clean,
    ];

    /// The exact label accepted on the command line.
    pub fn label(&self) -> &'static str {
        match self {
            Task::Setup => "Setup",
            Task::Lint => "Lint",
            Task::Format => "Format",
            Task::Test => "Test",
            Task::Backtest => "Backtest",
            Task::Run => "Run",
            Task::Hook => "Hook",
            Task::Clean => "Clean",
        }
    }

    /// Parse a raw task name. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Result<Task, InvalidTaskError> {
        Task::ALL
            .iter()
            .copied()
            .find(|task| task.label() == value)
            .ok_or_else(|| InvalidTaskError {
                value: value.to_string(),
                expected: Task::ALL
                    .iter()
                    .map(|task| task.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Optional per-invocation path parameters. Only Backtest reads them.
#[derive(Debug, Clone, Default)]
pub struct InvocationParams {
    /// Equity-curve CSV to read.
    pub csv: Option<PathBuf>,
    /// Plot file to write.
    pub out: Option<PathBuf>,
}

impl InvocationParams {
    /// CSV input path, falling back to the default equity-curve report.
    pub fn csv_path(&self) -> PathBuf {
        self.csv
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EQUITY_CSV))
    }

    /// Plot output path, falling back to the default location.
    pub fn out_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EQUITY_PLOT))
    }
}
