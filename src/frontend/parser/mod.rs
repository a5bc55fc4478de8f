//! Parser module
//!
//! A recursive-descent reader turning tokens into a tree of groups, chains and
//! raw names. Names are then resolved against a library (see [`resolve`]) and
//! optionally simplified (see [`simplify`]).
//!
//! Grammar:
//!
//! ```text
//! library     := (name group)*
//! group       := '{' alternation '}'
//! alternation := chain ('|' chain)*
//! chain       := (name | group)*
//! ```

pub mod ast;
pub mod resolve;
pub mod simplify;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::frontend::lexer::{tokenize, Token, TokenKind};
use crate::util::config::Options;
use ast::*;
pub use resolve::{resolve_group, resolve_references, Namespace};
pub use simplify::{simplify_expr, simplify_group};

/// Parse result
pub type ParseResult<T> = Result<T, ParseError>;

/// Definitions read by [`read_lib`], in source order, not yet resolved
pub type RawDefinitions = IndexMap<String, Group<RawExpr>>;

/// Parse error
///
/// Every variant carries the source line it was raised at, or `None` when the
/// input ended before anything could be blamed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Parser error{}: Unexpected end of file{}. Expected a '{expected}'.", in_line(.line), after_token(.after))]
    UnexpectedEof {
        line: Option<usize>,
        /// Last token read before input ran out
        after: Option<String>,
        expected: char,
    },

    #[error("Parser error in line {line}: Unexpected token '{token}'.{}", expected_char(.expected))]
    UnexpectedToken {
        line: usize,
        token: String,
        expected: Option<char>,
    },

    #[error("Parser error in line {line}: Unexpected token '{token}'. Expected function declaration.")]
    ExpectedDefinition { line: usize, token: String },

    #[error("Parser error in line {line}: Function '{name}' is built-in and cannot be redefined.")]
    BuiltinRedefinition { line: usize, name: String },

    #[error("Parser error in line {line}: Function '{name}' already defined.")]
    DuplicateDefinition { line: usize, name: String },

    #[error("Parser error in line {line}: Reference to undefined function: '{name}'.")]
    UndefinedReference { line: usize, name: String },
}

fn in_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" in line {}", l)).unwrap_or_default()
}

fn after_token(after: &Option<String>) -> String {
    after
        .as_ref()
        .map(|t| format!(" after '{}'", t))
        .unwrap_or_default()
}

fn expected_char(expected: &Option<char>) -> String {
    expected
        .map(|c| format!(" Expected a '{}'.", c))
        .unwrap_or_default()
}

impl ParseError {
    /// Offending source line, if known
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedEof { line, .. } => *line,
            ParseError::UnexpectedToken { line, .. }
            | ParseError::ExpectedDefinition { line, .. }
            | ParseError::BuiltinRedefinition { line, .. }
            | ParseError::DuplicateDefinition { line, .. }
            | ParseError::UndefinedReference { line, .. } => Some(*line),
        }
    }
}

/// Read an alternation starting at `pos`, stopping before a `}` or at the end
/// of input.
///
/// Returns the unnamed group and the index of the first unconsumed token.
pub fn read_expr(
    tokens: &[Token],
    mut pos: usize,
) -> ParseResult<(Group<RawExpr>, usize)> {
    let mut branches = Vec::new();
    let mut chain = Vec::new();

    while let Some(token) = tokens.get(pos) {
        match token.kind {
            TokenKind::OpenGroup => {
                let (group, next) = read_group(tokens, pos)?;
                chain.push(RawExpr::Group(group));
                pos = next;
            }
            TokenKind::CloseGroup => break,
            TokenKind::BranchSeparator => {
                branches.push(std::mem::take(&mut chain));
                pos += 1;
            }
            TokenKind::Name => {
                chain.push(RawExpr::Name(token.clone()));
                pos += 1;
            }
        }
    }

    branches.push(chain);
    Ok((Group::new(branches), pos))
}

/// Read a `{ ... }` group starting at `pos`.
pub fn read_group(
    tokens: &[Token],
    pos: usize,
) -> ParseResult<(Group<RawExpr>, usize)> {
    let open = match tokens.get(pos) {
        Some(token) => token,
        None => {
            let last = tokens.last();
            return Err(ParseError::UnexpectedEof {
                line: last.map(|t| t.line),
                after: last.map(|t| t.text.clone()),
                expected: '{',
            });
        }
    };
    if !open.is(TokenKind::OpenGroup) {
        return Err(ParseError::UnexpectedToken {
            line: open.line,
            token: open.text.clone(),
            expected: Some('{'),
        });
    }

    let (group, pos) = read_expr(tokens, pos + 1)?;

    match tokens.get(pos) {
        Some(close) if close.is(TokenKind::CloseGroup) => Ok((group, pos + 1)),
        // read_expr only stops early on a close token
        Some(other) => Err(ParseError::UnexpectedToken {
            line: other.line,
            token: other.text.clone(),
            expected: Some('}'),
        }),
        None => Err(ParseError::UnexpectedEof {
            line: Some(open.line),
            after: Some(open.text.clone()),
            expected: '}',
        }),
    }
}

/// Read `name { ... }` definitions until the end of input.
///
/// `existing` names are treated as already defined. Returns the new
/// definitions, each group carrying its function name.
pub fn read_lib(
    tokens: &[Token],
    mut pos: usize,
    existing: &dyn Namespace,
) -> ParseResult<(RawDefinitions, usize)> {
    let mut definitions = RawDefinitions::new();

    while let Some(token) = tokens.get(pos) {
        if !token.is(TokenKind::Name) {
            return Err(ParseError::ExpectedDefinition {
                line: token.line,
                token: token.text.clone(),
            });
        }
        if Builtin::is_reserved(&token.text) {
            return Err(ParseError::BuiltinRedefinition {
                line: token.line,
                name: token.text.clone(),
            });
        }
        if existing.defines(&token.text) || definitions.contains_key(&token.text) {
            return Err(ParseError::DuplicateDefinition {
                line: token.line,
                name: token.text.clone(),
            });
        }

        let (group, next) = read_group(tokens, pos + 1)?;
        definitions.insert(token.text.clone(), group.named(token.text.clone()));
        pos = next;
    }

    Ok((definitions, pos))
}

/// Parse a single expression against `library`.
///
/// With `library` set to `None`, names are accepted without validation.
pub fn parse_expr(
    text: &str,
    library: Option<&dyn Namespace>,
    options: &Options,
) -> ParseResult<Expr> {
    let tokens = tokenize(text);
    let (group, pos) = read_expr(&tokens, 0)?;

    if let Some(token) = tokens.get(pos) {
        return Err(ParseError::UnexpectedToken {
            line: token.line,
            token: token.text.clone(),
            expected: None,
        });
    }

    let expr = Expr::Group(resolve_group(group, library)?);
    let expr = if options.simplify {
        simplify_expr(expr)
    } else {
        expr
    };
    debug!("Parsed expression: {}", expr);
    Ok(expr)
}

/// Parse library source text on top of `existing` definitions.
///
/// References may point forward or at any name in `existing`. Returns the
/// new, resolved definitions in source order.
pub fn parse_lib(
    text: &str,
    existing: &dyn Namespace,
    options: &Options,
) -> ParseResult<IndexMap<String, Group>> {
    let tokens = tokenize(text);
    let (raw, _) = read_lib(&tokens, 0, existing)?;

    let scope: &dyn Namespace = &resolve::Pending {
        existing,
        pending: &raw,
    };
    let mut definitions = IndexMap::with_capacity(raw.len());
    for (name, group) in &raw {
        let group = resolve_group(group.clone(), Some(scope))?;
        let group = if options.simplify {
            simplify_group(group)
        } else {
            group
        };
        definitions.insert(name.clone(), group);
    }

    debug!("Parsed {} function definitions", definitions.len());
    Ok(definitions)
}

#[cfg(test)]
mod tests;
