//! Reference resolution
//!
//! Turns raw name tokens into builtin calls or function references.

use super::ast::{Builtin, Chain, Expr, Group, RawExpr};
use super::{ParseError, ParseResult, RawDefinitions};

/// Something that can answer "is this function defined?"
pub trait Namespace {
    fn defines(
        &self,
        name: &str,
    ) -> bool;
}

impl<V> Namespace for indexmap::IndexMap<String, V> {
    fn defines(
        &self,
        name: &str,
    ) -> bool {
        self.contains_key(name)
    }
}

/// An empty namespace: nothing is defined
impl Namespace for () {
    fn defines(
        &self,
        _name: &str,
    ) -> bool {
        false
    }
}

/// Names already in a library plus definitions still being loaded
pub(crate) struct Pending<'a> {
    pub existing: &'a dyn Namespace,
    pub pending: &'a RawDefinitions,
}

impl Namespace for Pending<'_> {
    fn defines(
        &self,
        name: &str,
    ) -> bool {
        self.pending.contains_key(name) || self.existing.defines(name)
    }
}

/// Resolve a single raw node.
///
/// Without a namespace, every non-builtin name becomes a forward reference.
pub fn resolve_references(
    raw: RawExpr,
    namespace: Option<&dyn Namespace>,
) -> ParseResult<Expr> {
    match raw {
        RawExpr::Name(token) => {
            if let Some(builtin) = Builtin::from_name(&token.text) {
                return Ok(Expr::Builtin(builtin));
            }
            match namespace {
                Some(ns) if !ns.defines(&token.text) => Err(ParseError::UndefinedReference {
                    line: token.line,
                    name: token.text,
                }),
                _ => Ok(Expr::Function(token.text)),
            }
        }
        RawExpr::Group(group) => resolve_group(group, namespace).map(Expr::Group),
    }
}

/// Resolve every name inside `group`, keeping its shape and name.
pub fn resolve_group(
    group: Group<RawExpr>,
    namespace: Option<&dyn Namespace>,
) -> ParseResult<Group> {
    let branches = group
        .branches
        .into_iter()
        .map(|chain| {
            chain
                .into_iter()
                .map(|raw| resolve_references(raw, namespace))
                .collect::<ParseResult<Chain>>()
        })
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(Group {
        branches,
        name: group.name,
    })
}
