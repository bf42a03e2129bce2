//! botctl - development-task orchestrator for the trading-bot repository.
//!
//! Usage:
//!   botctl <TASK>                        Run one task (Setup, Lint, Format,
//!                                        Test, Backtest, Run, Hook, Clean)
//!   botctl Backtest --csv X --out Y      Backtest with explicit report paths

use botctl::{dispatch, Config, InvocationParams, OrchestratorError, ProcessRunner, Task};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

/// botctl - development-task orchestrator
#[derive(Parser)]
#[command(name = "botctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Task to run: Setup, Lint, Format, Test, Backtest, Run, Hook or Clean
    /// (exact, case-sensitive match)
    #[arg(value_name = "TASK")]
    task: String,

    /// Equity-curve CSV read by Backtest
    /// (default: bridge_out/reports/equity_curve.csv)
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Plot file written by Backtest
    /// (default: bridge_out/reports/equity_curve.png)
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Path to configuration file (overrides XDG default)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration from file (explicit or XDG default)
    let config = match Config::load(cli.config.clone()) {
        Ok(config) => {
            if let Some(path) = &cli.config {
                info!("Loaded configuration from: {}", path.display());
            }
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let params = InvocationParams {
        csv: cli.csv,
        out: cli.out,
    };

    // The process exit status is the selected handler's surfaced tool
    // status; validation and environment failures get their own codes.
    match run_task(&cli.task, &params, &config) {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Validate the task name against the closed set, then dispatch. Validation
/// happens before any environment mutation or subprocess launch.
fn run_task(
    name: &str,
    params: &InvocationParams,
    config: &Config,
) -> Result<botctl::ExitStatus, OrchestratorError> {
    let task = Task::parse(name)?;
    dispatch(task, params, config, &ProcessRunner)
}

/// Invalid task names exit 2 (usage error); environment and launch failures
/// exit 1.
fn exit_code_for(err: &OrchestratorError) -> i32 {
    match err {
        OrchestratorError::InvalidTask(_) => 2,
        OrchestratorError::Environment(_) | OrchestratorError::Launch(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_task_maps_to_usage_error() {
        let err = OrchestratorError::from(Task::parse("deploy").unwrap_err());
        assert_eq!(exit_code_for(&err), 2);
    }
}
