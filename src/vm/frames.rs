//! VM call frames

use crate::frontend::parser::ast::{Expr, Group};

/// A natural number, or `None` for failure
pub type Value = Option<u64>;

/// One level of the evaluation stack
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Value the group was entered with; every branch restarts from it
    pub input: Value,
    pub group: &'a Group,
    /// Branch currently being tried
    pub branch: usize,
    /// Next position in that branch's chain
    pub position: usize,
}

impl<'a> Frame<'a> {
    /// Enter `group` with `input`, at its first branch
    #[inline]
    pub fn enter(
        group: &'a Group,
        input: Value,
    ) -> Self {
        Self {
            input,
            group,
            branch: 0,
            position: 0,
        }
    }

    /// Move on to the next alternative, restarting its chain
    #[inline]
    pub fn next_branch(self) -> Self {
        Self {
            branch: self.branch + 1,
            position: 0,
            ..self
        }
    }

    /// Step past the expression at the cursor
    #[inline]
    pub fn advance(self) -> Self {
        Self {
            position: self.position + 1,
            ..self
        }
    }

    /// All alternatives have been tried
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.branch >= self.group.branches.len()
    }

    /// The expression at the cursor, or `None` at the end of the chain
    #[inline]
    pub fn current(&self) -> Option<&'a Expr> {
        self.group.get(self.branch, self.position)
    }

    /// The expression most recently started in this frame
    #[inline]
    pub fn last_started(&self) -> Option<&'a Expr> {
        self.position
            .checked_sub(1)
            .and_then(|position| self.group.get(self.branch, position))
    }
}
