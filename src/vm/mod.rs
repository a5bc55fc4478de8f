//! Virtual Machine
//!
//! This module contains the explicit-stack tree evaluator.

pub use errors::{EvalError, VMResult};
pub use executor::{evaluate, evaluate_with_output, run, Executor, MAIN_FUNCTION};
pub use frames::{Frame, Value};
pub use trace::{display_value, StackTrace, TraceFrame, MAX_TRACE_FRAMES};

mod errors;
mod executor;
mod frames;
mod trace;
