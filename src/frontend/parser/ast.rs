//! Abstract Syntax Tree types

use std::fmt;

use crate::frontend::lexer::Token;

/// One of the four primitive operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `+`: always succeeds with `x + 1`
    Increment,
    /// `-`: `x - 1`, fails on zero
    Decrement,
    /// `!`: prints the current value
    Print,
    /// `@`: prints the evaluation stack
    Trace,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [
        Builtin::Increment,
        Builtin::Decrement,
        Builtin::Print,
        Builtin::Trace,
    ];

    /// Look up a builtin by its reserved name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "+" => Some(Builtin::Increment),
            "-" => Some(Builtin::Decrement),
            "!" => Some(Builtin::Print),
            "@" => Some(Builtin::Trace),
            _ => None,
        }
    }

    /// Reserved one-character name
    pub fn symbol(self) -> &'static str {
        match self {
            Builtin::Increment => "+",
            Builtin::Decrement => "-",
            Builtin::Print => "!",
            Builtin::Trace => "@",
        }
    }

    /// Whether `name` is reserved for a builtin
    #[inline]
    pub fn is_reserved(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Print and trace have observable effects beyond the carried value
    #[inline]
    pub fn has_side_effect(self) -> bool {
        matches!(self, Builtin::Print | Builtin::Trace)
    }
}

impl fmt::Display for Builtin {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Sequential composition of expressions
pub type Chain<E = Expr> = Vec<E>;

/// Ordered alternation over chains
///
/// `name` is only set on top-level library entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<E = Expr> {
    pub branches: Vec<Chain<E>>,
    pub name: Option<String>,
}

impl<E> Group<E> {
    /// Create an unnamed group
    pub fn new(branches: Vec<Chain<E>>) -> Self {
        Self {
            branches,
            name: None,
        }
    }

    /// Attach a function name
    pub fn named(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The expression at `(branch, position)`, if any
    pub fn get(
        &self,
        branch: usize,
        position: usize,
    ) -> Option<&E> {
        self.branches.get(branch)?.get(position)
    }
}

impl<E: fmt::Display> Group<E> {
    /// Column at which the expression `(branch, position)` starts in this
    /// group's rendered text
    pub fn column_of(
        &self,
        branch: usize,
        position: usize,
    ) -> usize {
        // "{ "
        let mut column = 2;
        for chain in self.branches.iter().take(branch) {
            column += chain
                .iter()
                .map(|expr| expr.to_string().len() + 1)
                .sum::<usize>();
            // "| "
            column += 2;
        }
        if let Some(chain) = self.branches.get(branch) {
            column += chain
                .iter()
                .take(position)
                .map(|expr| expr.to_string().len() + 1)
                .sum::<usize>();
        }
        column
    }
}

impl<E: fmt::Display> fmt::Display for Group<E> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, chain) in self.branches.iter().enumerate() {
            if i > 0 {
                f.write_str("| ")?;
            }
            for expr in chain {
                write!(f, "{} ", expr)?;
            }
        }
        f.write_str("}")
    }
}

/// Resolved expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Builtin(Builtin),
    /// Reference to a library entry by name
    Function(String),
    Group(Group),
}

impl Expr {
    /// Shorthand for a function reference
    pub fn function(name: impl Into<String>) -> Self {
        Expr::Function(name.into())
    }

    #[inline]
    pub fn is_builtin(
        &self,
        builtin: Builtin,
    ) -> bool {
        matches!(self, Expr::Builtin(b) if *b == builtin)
    }

    /// The group, if this expression is one
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Expr::Group(group) => Some(group),
            _ => None,
        }
    }
}

impl From<Builtin> for Expr {
    fn from(builtin: Builtin) -> Self {
        Expr::Builtin(builtin)
    }
}

impl From<Group> for Expr {
    fn from(group: Group) -> Self {
        Expr::Group(group)
    }
}

impl fmt::Display for Expr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Expr::Builtin(builtin) => builtin.fmt(f),
            Expr::Function(name) => f.write_str(name),
            Expr::Group(group) => group.fmt(f),
        }
    }
}

/// Parse-tree node before reference resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawExpr {
    Name(Token),
    Group(Group<RawExpr>),
}

impl fmt::Display for RawExpr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            RawExpr::Name(token) => token.fmt(f),
            RawExpr::Group(group) => group.fmt(f),
        }
    }
}
