//! Tree simplification
//!
//! Rewrites a resolved tree into a smaller one with the same input/output
//! behaviour and the same side effects:
//!
//! - single-branch subgroups are spliced into the surrounding chain
//! - `+ -` pairs cancel (`- +` does not: `-` fails on zero)
//! - branches after an empty branch are unreachable and dropped
//! - a branch holding only a group contributes that group's branches
//! - a one-branch, one-expression group collapses to the expression

use super::ast::{Builtin, Chain, Expr, Group};

/// Simplify an expression, unwrapping trivial groups.
pub fn simplify_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Group(group) => {
            let mut group = simplify_branches(group);
            if group.branches.len() == 1 && group.branches[0].len() == 1 {
                if let Some(only) = group.branches[0].pop() {
                    return only;
                }
            }
            Expr::Group(group)
        }
        other => other,
    }
}

/// Simplify a group, always returning a group (library entries stay groups).
pub fn simplify_group(group: Group) -> Group {
    simplify_branches(group)
}

fn simplify_branches(group: Group) -> Group {
    let mut branches: Vec<Chain> = Vec::with_capacity(group.branches.len());

    for chain in group.branches {
        let mut chain = simplify_chain(chain);

        if chain.len() == 1 && matches!(chain[0], Expr::Group(_)) {
            if let Some(Expr::Group(inner)) = chain.pop() {
                branches.extend(inner.branches);
            }
        } else {
            branches.push(chain);
        }
    }

    // An empty branch always succeeds, so nothing after it can run
    if let Some(first_empty) = branches.iter().position(|chain| chain.is_empty()) {
        branches.truncate(first_empty + 1);
    }

    Group {
        branches,
        name: group.name,
    }
}

fn simplify_chain(chain: Chain) -> Chain {
    let mut out: Chain = Vec::with_capacity(chain.len());

    for expr in chain {
        let mut join = out.len();

        match simplify_expr(expr) {
            Expr::Group(mut group) if group.branches.len() == 1 => {
                out.append(&mut group.branches[0]);
            }
            other => out.push(other),
        }

        // Cancel `+ -` across the join, repeatedly
        while join > 0 && join < out.len() && cancels(&out[join - 1], &out[join]) {
            out.drain(join - 1..=join);
            join -= 1;
        }
    }

    out
}

#[inline]
fn cancels(
    first: &Expr,
    second: &Expr,
) -> bool {
    first.is_builtin(Builtin::Increment) && second.is_builtin(Builtin::Decrement)
}
