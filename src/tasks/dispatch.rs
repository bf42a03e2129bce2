//! Ensure-then-dispatch.
//!
//! Every task bootstraps the environment first, then exactly one handler
//! runs and its status is returned unchanged. Adding a task means adding
//! one enum variant and one match arm here.

use super::handlers;
use crate::config::Config;
use crate::core::{InvocationParams, OrchestratorError, Task};
use crate::environment::Ensurer;
use crate::execution::{ExitStatus, ToolRunner};

/// Run one validated task to completion.
pub fn dispatch<R: ToolRunner>(
    task: Task,
    params: &InvocationParams,
    config: &Config,
    runner: &R,
) -> Result<ExitStatus, OrchestratorError> {
    let ctx = Ensurer::new(&config.environment).ensure(runner)?;

    let status = match task {
        Task::Setup => handlers::setup(&ctx, runner)?,
        Task::Lint => handlers::lint(&ctx, runner)?,
        Task::Format => handlers::format(&ctx, runner)?,
        Task::Test => handlers::test(&ctx, runner)?,
        Task::Backtest => handlers::backtest(&ctx, runner, &config.backtest, params)?,
        Task::Run => handlers::run(&ctx, runner, &config.run)?,
        Task::Hook => handlers::hook(&ctx, runner)?,
        Task::Clean => handlers::clean(&config.clean),
    };

    Ok(status)
}
