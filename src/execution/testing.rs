//! Recording tool-runner double for tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::{ExecutionContext, ExitStatus, ToolError, ToolRunner};

/// One observed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub in_venv: bool,
}

/// Records every invocation and replays scripted exit statuses; once the
/// script runs out, everything succeeds.
#[derive(Debug, Default)]
pub(crate) struct RecordingRunner {
    calls: RefCell<Vec<RecordedCall>>,
    scripted: RefCell<VecDeque<ExitStatus>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue exit codes for upcoming calls, consumed in order.
    pub fn script(&self, codes: &[i32]) {
        let mut scripted = self.scripted.borrow_mut();
        for code in codes {
            scripted.push_back(ExitStatus::from_code(*code));
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.program.clone())
            .collect()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(
        &self,
        ctx: &ExecutionContext,
        program: &str,
        args: &[&str],
    ) -> Result<ExitStatus, ToolError> {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            in_venv: ctx.is_venv(),
        });
        Ok(self
            .scripted
            .borrow_mut()
            .pop_front()
            .unwrap_or(ExitStatus::SUCCESS))
    }
}
