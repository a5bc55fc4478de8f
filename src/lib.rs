//! Unarian Programming Language
//!
//! An esoteric language whose only value is a natural number. Programs are
//! built from four builtins (`+`, `-`, `!`, `@`) and named functions, composed
//! by sequencing and by ordered alternation that backtracks on failure.
//!
//! # Example
//!
//! ```rust
//! use unarian::{load, Options};
//!
//! let options = Options::default();
//! let library = load("main { - | + }", &options).unwrap();
//! assert_eq!(library.run(0, &options).unwrap(), Some(1));
//! assert_eq!(library.run(3, &options).unwrap(), Some(2));
//! ```

#![warn(rust_2018_idioms)]

// Public modules
pub mod frontend;
pub mod vm;

// Utility modules
pub mod util;

// Re-exports
pub use frontend::parser::ast::{Builtin, Expr, Group};
pub use frontend::parser::ParseError;
pub use frontend::Library;
pub use util::config::Options;
pub use util::diagnostic::{Error, Result};
pub use vm::{EvalError, StackTrace, Value};

use std::path::Path;

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "Unarian";

/// Load a library from source text
pub fn load(
    text: &str,
    options: &Options,
) -> Result<Library> {
    Ok(Library::load(text, options)?)
}

/// Load a library from a source file
pub fn load_file(
    path: impl AsRef<Path>,
    options: &Options,
) -> Result<Library> {
    Library::load_file(path, options)
}
