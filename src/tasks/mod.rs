//! Task dispatch and handlers.
//!
//! The dispatcher maps a validated task to exactly one handler; the
//! handlers delegate to external tools through the execution layer.

mod dispatch;
mod handlers;

pub use dispatch::dispatch;
