//! Function library
//!
//! A library is built while loading (definitions are checked for reserved
//! and duplicate names, then resolved against the finished set) and is only
//! read afterwards. Evaluation takes it by shared reference, so independent
//! evaluations can run against the same library.

use std::fmt;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use super::parser::ast::{Expr, Group};
use super::parser::{parse_expr, parse_lib, Namespace, ParseResult};
use crate::util::config::Options;
use crate::util::diagnostic::{Error, Result};
use crate::vm::{self, VMResult, Value};

/// Named function definitions, in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    functions: IndexMap<String, Group>,
    /// Where the source came from, if loaded from a file
    name: Option<String>,
}

impl Library {
    /// An empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library from source text
    pub fn load(
        text: &str,
        options: &Options,
    ) -> ParseResult<Self> {
        let mut library = Self::new();
        library.extend(text, options)?;
        Ok(library)
    }

    /// Load a library from a UTF-8 source file
    pub fn load_file(
        path: impl AsRef<Path>,
        options: &Options,
    ) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut library = Self::load(&text, options)?;
        library.name = Some(path.display().to_string());
        Ok(library)
    }

    /// Add the definitions in `text`.
    ///
    /// New names must not collide with builtins or existing definitions. On
    /// error the library is left unchanged.
    pub fn extend(
        &mut self,
        text: &str,
        options: &Options,
    ) -> ParseResult<()> {
        let definitions = parse_lib(text, &*self, options)?;
        debug!(
            "Loaded {} functions into library{}",
            definitions.len(),
            self.name.as_deref().map(|n| format!(" {}", n)).unwrap_or_default()
        );
        self.functions.extend(definitions);
        Ok(())
    }

    /// Source name, if loaded from a file
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Look up a function definition
    #[inline]
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Group> {
        self.functions.get(name)
    }

    #[inline]
    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.functions.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Defined names, in definition order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Definitions, in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.functions.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Parse an expression whose references must resolve in this library
    pub fn parse(
        &self,
        text: &str,
        options: &Options,
    ) -> ParseResult<Expr> {
        parse_expr(text, Some(self), options)
    }

    /// Evaluate `expr` on `input`, printing program output to stdout
    pub fn evaluate(
        &self,
        expr: &Expr,
        input: u64,
        options: &Options,
    ) -> VMResult<Value> {
        vm::evaluate(self, expr, input, options)
    }

    /// Evaluate `expr` on `input`, writing program output to `out`
    pub fn evaluate_with_output<W: Write>(
        &self,
        expr: &Expr,
        input: u64,
        options: &Options,
        out: W,
    ) -> VMResult<Value> {
        vm::evaluate_with_output(self, expr, input, options, out)
    }

    /// Parse `text` as an expression, then evaluate it on `input`
    pub fn evaluate_str(
        &self,
        text: &str,
        input: u64,
        options: &Options,
    ) -> Result<Value> {
        let expr = self.parse(text, options)?;
        Ok(self.evaluate(&expr, input, options)?)
    }

    /// Evaluate the `main` function on `input`
    pub fn run(
        &self,
        input: u64,
        options: &Options,
    ) -> VMResult<Value> {
        vm::run(self, input, options)
    }
}

impl Namespace for Library {
    fn defines(
        &self,
        name: &str,
    ) -> bool {
        self.contains(name)
    }
}

/// Renders loadable source text, one definition per line
impl fmt::Display for Library {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (name, group) in &self.functions {
            writeln!(f, "{} {}", name, group)?;
        }
        Ok(())
    }
}
