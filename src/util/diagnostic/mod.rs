//! Crate-level errors
//!
//! Parse and evaluation errors keep their own types; this wraps them, plus
//! file I/O, for entry points that can fail in more than one phase.

use std::path::PathBuf;

use thiserror::Error;

use crate::frontend::parser::ParseError;
use crate::vm::EvalError;

/// Crate result
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any error the engine can report
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Source line, for parse errors that know it
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse(err) => err.line(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    #[inline]
    pub fn is_eval(&self) -> bool {
        matches!(self, Error::Eval(_))
    }
}
