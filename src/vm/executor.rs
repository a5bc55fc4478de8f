//! Explicit-stack evaluator
//!
//! Evaluation never recurses on the host stack. Each group being evaluated
//! owns a [`Frame`] on a `Vec`, and one loop steps the top frame:
//!
//! 1. a frame entered with failure returns failure
//! 2. a frame out of branches returns failure
//! 3. a failure mid-chain retries the next branch on the frame's input
//! 4. a finished chain returns the carried value
//! 5. otherwise the next expression runs: builtins apply in place, functions
//!    and nested groups push a new frame
//!
//! The stack size is checked against `max_depth` on every step.

use std::io::{self, Write};

use tracing::{debug, trace};

use super::errors::{EvalError, VMResult};
use super::frames::{Frame, Value};
use super::trace::{display_value, StackTrace, MAX_TRACE_FRAMES};
use crate::frontend::library::Library;
use crate::frontend::parser::ast::{Builtin, Expr};
use crate::util::config::Options;

/// Name of the function [`run`] starts from
pub const MAIN_FUNCTION: &str = "main";

/// Evaluator bound to a library, options and an output sink for `!` and `@`
#[derive(Debug)]
pub struct Executor<'a, W: Write> {
    library: &'a Library,
    options: Options,
    out: W,
}

impl<'a> Executor<'a, io::Stdout> {
    /// Executor writing program output to stdout
    pub fn stdout(
        library: &'a Library,
        options: &Options,
    ) -> Self {
        Self::new(library, options, io::stdout())
    }
}

impl<'a, W: Write> Executor<'a, W> {
    pub fn new(
        library: &'a Library,
        options: &Options,
        out: W,
    ) -> Self {
        Self {
            library,
            options: *options,
            out,
        }
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Evaluate `expr` on `input`.
    ///
    /// Returns `Ok(None)` when the program fails; `Err` only for undefined
    /// functions, depth overflow and output errors.
    pub fn evaluate<'e>(
        &mut self,
        expr: &'e Expr,
        input: u64,
    ) -> VMResult<Value>
    where
        'a: 'e,
    {
        debug!("Evaluating {} on input {}", expr, input);

        let root = match expr {
            Expr::Builtin(builtin) => return self.apply_builtin(*builtin, input, &[]),
            Expr::Function(name) => {
                self.library
                    .get(name)
                    .ok_or_else(|| EvalError::UndefinedFunction {
                        name: name.clone(),
                        trace: StackTrace::empty(Some(input)),
                    })?
            }
            Expr::Group(group) => group,
        };

        let mut stack: Vec<Frame<'e>> = vec![Frame::enter(root, Some(input))];
        let mut x: Value = Some(input);

        loop {
            if stack.len() > self.options.max_depth {
                return Err(EvalError::DepthExceeded {
                    max_depth: self.options.max_depth,
                    trace: StackTrace::capture(&stack, x),
                });
            }

            let Some(frame) = stack.pop() else {
                break;
            };

            let Some(frame_input) = frame.input else {
                x = None;
                continue;
            };

            if frame.exhausted() {
                trace!("All branches failed in {}", frame.group);
                x = None;
                continue;
            }

            let value = match x {
                Some(value) => value,
                None => {
                    stack.push(frame.next_branch());
                    x = Some(frame_input);
                    continue;
                }
            };

            let Some(next) = frame.current() else {
                trace!("Returning {} from {}", value, frame.group);
                continue;
            };

            stack.push(frame.advance());

            match next {
                Expr::Builtin(builtin) => {
                    x = self.apply_builtin(*builtin, value, &stack)?;
                }
                Expr::Function(name) => {
                    let Some(group) = self.library.get(name) else {
                        return Err(EvalError::UndefinedFunction {
                            name: name.clone(),
                            trace: StackTrace::capture(&stack, x),
                        });
                    };
                    trace!("Calling {} with {}", name, value);
                    stack.push(Frame::enter(group, x));
                }
                Expr::Group(group) => {
                    stack.push(Frame::enter(group, x));
                }
            }
        }

        debug!("Evaluated to {}", display_value(x));
        Ok(x)
    }

    /// Evaluate the library's `main` function on `input`.
    pub fn run(
        &mut self,
        input: u64,
    ) -> VMResult<Value> {
        if self.library.get(MAIN_FUNCTION).is_none() {
            return Err(EvalError::MissingEntry(MAIN_FUNCTION.to_string()));
        }
        self.evaluate(&Expr::function(MAIN_FUNCTION), input)
    }

    fn apply_builtin(
        &mut self,
        builtin: Builtin,
        value: u64,
        stack: &[Frame<'_>],
    ) -> VMResult<Value> {
        match builtin {
            Builtin::Increment => match value.checked_add(1) {
                Some(next) => Ok(Some(next)),
                None => Err(EvalError::Overflow {
                    trace: StackTrace::capture(stack, Some(value)),
                }),
            },
            Builtin::Decrement => Ok(value.checked_sub(1)),
            Builtin::Print => {
                if self.options.debug {
                    writeln!(self.out, "{}", value)?;
                }
                Ok(Some(value))
            }
            Builtin::Trace => {
                if self.options.debug {
                    let trace = StackTrace::capture(stack, Some(value));
                    for line in trace.lines(MAX_TRACE_FRAMES) {
                        writeln!(self.out, "{}", line)?;
                    }
                }
                Ok(Some(value))
            }
        }
    }
}

/// Evaluate `expr` on `input`, writing program output to stdout.
pub fn evaluate(
    library: &Library,
    expr: &Expr,
    input: u64,
    options: &Options,
) -> VMResult<Value> {
    Executor::stdout(library, options).evaluate(expr, input)
}

/// Evaluate `expr` on `input`, writing program output to `out`.
pub fn evaluate_with_output<W: Write>(
    library: &Library,
    expr: &Expr,
    input: u64,
    options: &Options,
    out: W,
) -> VMResult<Value> {
    Executor::new(library, options, out).evaluate(expr, input)
}

/// Evaluate the library's `main` function on `input`.
pub fn run(
    library: &Library,
    input: u64,
    options: &Options,
) -> VMResult<Value> {
    Executor::stdout(library, options).run(input)
}
