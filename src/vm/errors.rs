//! VM errors

use thiserror::Error;

use super::trace::StackTrace;

/// VM result
pub type VMResult<T> = Result<T, EvalError>;

/// Evaluation errors
///
/// Program-level failure is not an error: it is the `None` value. These are
/// the conditions that abort an evaluation outright.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Interpreter error: Reference to undefined function: '{name}'.\n{trace}")]
    UndefinedFunction { name: String, trace: StackTrace },

    #[error("Interpreter error: Exceeded maximum stack depth: {max_depth}.\n{trace}")]
    DepthExceeded { max_depth: usize, trace: StackTrace },

    #[error("Interpreter error: Cannot find main function '{0}'.")]
    MissingEntry(String),

    #[error("Interpreter error: Value overflow incrementing {}.\n{trace}", u64::MAX)]
    Overflow { trace: StackTrace },

    #[error("Interpreter error: Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl EvalError {
    /// The stack snapshot, for errors raised mid-evaluation
    pub fn trace(&self) -> Option<&StackTrace> {
        match self {
            EvalError::UndefinedFunction { trace, .. }
            | EvalError::DepthExceeded { trace, .. }
            | EvalError::Overflow { trace } => Some(trace),
            EvalError::MissingEntry(_) | EvalError::Output(_) => None,
        }
    }
}
