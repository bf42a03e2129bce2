//! Core vocabulary: the closed task set, invocation parameters and the
//! top-level error taxonomy.

mod error;
mod task;

pub use error::OrchestratorError;
pub use task::{
    DEFAULT_EQUITY_CSV, DEFAULT_EQUITY_PLOT, InvalidTaskError, InvocationParams, Task,
};
