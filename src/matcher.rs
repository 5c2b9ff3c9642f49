//! Pattern matching and rewriting.
//!
//! This module is the one place that knows about both [`Pattern`] and
//! [`Expression`]. Rather than have the two types import each other and
//! define symmetrical matching methods, both stay plain data, and every
//! operation that needs to see both lives in this neutral module.

use std::collections::{HashMap, HashSet};

use crate::error::SubstitutionError;
use crate::expression::Expression;
use crate::pattern::{Binding, Pattern};

/// The capture environment produced by one match: a finite map from
/// capture index to the subexpression bound there. Transient — built by
/// one match, consumed by one rewrite.
pub type Environment = HashMap<usize, Expression>;

/// Fast boolean shape check: does `expr`'s structure satisfy `pattern`,
/// ignoring whether repeated capture indices bind consistent
/// subexpressions?
///
/// A literal anchor matches iff the expression equals it exactly, and
/// wins without descending into the pattern's children at that position.
pub fn check_shape(pattern: &Pattern, expr: &Expression) -> bool {
    if matches!(pattern.binding(), Binding::Literal(_)) {
        return check_node_shape(pattern, expr);
    }

    if !check_node_shape(pattern, expr) {
        return false;
    }

    pattern
        .children()
        .iter()
        .zip(expr.children())
        .all(|(child_pattern, child_expr)| check_shape(child_pattern, child_expr))
}

/// The single-node portion of [`check_shape`]: name, property, and arity,
/// without recursing into children.
fn check_node_shape(pattern: &Pattern, expr: &Expression) -> bool {
    if let Binding::Literal(literal) = pattern.binding() {
        return literal == expr;
    }

    if let Some(name) = pattern.name() {
        if name != expr.name() {
            return false;
        }
    }

    if !expr.property().inherits(std::slice::from_ref(pattern.property()), false) {
        return false;
    }

    let pattern_arity = pattern.children().len();
    let expr_arity = expr.children().len();

    if expr_arity < pattern_arity {
        return false;
    }
    if expr_arity > pattern_arity && pattern.check_labels() {
        return false;
    }

    true
}

/// One node of the diagnostic tree returned by [`check_shape_local`].
///
/// Mirrors the pattern's shape so a caller can see exactly where a
/// `checkShape` failure originates, rather than only the fast-path
/// boolean.
#[derive(Debug, Clone)]
pub struct ShapeCheck {
    /// The pattern node this result is for.
    pub pattern: Pattern,
    /// The expression node it was checked against.
    pub expression: Expression,
    /// Whether this node, in isolation, passed.
    pub valid: bool,
    /// Results for child pattern positions, paired with the
    /// corresponding expression children.
    pub children: Vec<ShapeCheck>,
}

/// Diagnostic counterpart to [`check_shape`]: walks pattern and
/// expression together and annotates every visited node with pass/fail,
/// instead of short-circuiting to a single boolean.
pub fn check_shape_local(pattern: &Pattern, expr: &Expression) -> ShapeCheck {
    let valid = check_node_shape(pattern, expr);

    let children = pattern
        .children()
        .iter()
        .zip(expr.children())
        .map(|(child_pattern, child_expr)| check_shape_local(child_pattern, child_expr))
        .collect();

    ShapeCheck {
        pattern: pattern.clone(),
        expression: expr.clone(),
        valid,
        children,
    }
}

/// Walks `pattern` and `expr` together, assumed to have already passed
/// [`check_shape`], collecting capture records and checking for
/// collisions.
///
/// Returns the flat list of `(index, expression)` records encountered
/// and whether the environment they describe is consistent (every index
/// bound to one, and only one, distinct subexpression).
pub fn captures(pattern: &Pattern, expr: &Expression) -> (Vec<(usize, Expression)>, bool) {
    if matches!(pattern.binding(), Binding::Literal(_)) {
        return (Vec::new(), true);
    }

    let mut records = Vec::new();

    if let Binding::Index(index) = pattern.binding() {
        records.push((*index, expr.clone()));
    }

    let mut consistent = true;
    for (child_pattern, child_expr) in pattern.children().iter().zip(expr.children()) {
        let (child_records, child_ok) = captures(child_pattern, child_expr);
        records.extend(child_records);
        consistent &= child_ok;
    }

    consistent &= collision_check(pattern, &records);
    (records, consistent)
}

/// Pure collision check: is `records` consistent with the indices
/// `pattern` declares, i.e. is every index bound to exactly one distinct
/// subexpression?
///
/// `pattern` here is the subtree the records were collected from — the
/// check compares the distinct `(index, expression)` pairs in `records`
/// against the distinct indices in `pattern.index_list()`.
pub fn collision_check(pattern: &Pattern, records: &[(usize, Expression)]) -> bool {
    let mut distinct: Vec<&(usize, Expression)> = Vec::new();
    for record in records {
        if !distinct
            .iter()
            .any(|(index, expr)| *index == record.0 && *expr == record.1)
        {
            distinct.push(record);
        }
    }

    let index_count: HashSet<usize> = pattern.index_list().into_iter().collect();
    distinct.len() == index_count.len()
}

/// Convenience wrapper: runs [`captures`] and returns just its
/// consistency verdict.
pub fn collision_check_from_expr(pattern: &Pattern, expr: &Expression) -> bool {
    captures(pattern, expr).1
}

/// Builds an expression by substituting `pattern`'s capture indices with
/// their bindings in `env`.
///
/// Literal nodes seed themselves; index nodes seed from their binding.
/// Children at pattern positions are replaced recursively; any seed
/// children beyond `pattern.children().len()` are preserved unchanged.
pub fn instantiate(pattern: &Pattern, env: &Environment) -> Result<Expression, SubstitutionError> {
    let seed = match pattern.binding() {
        Binding::Literal(literal) => literal.clone(),
        Binding::Index(index) => env
            .get(index)
            .cloned()
            .ok_or(SubstitutionError::MissingBinding { index: *index })?,
        Binding::None => return Err(SubstitutionError::UnboundNode),
    };

    let mut children: Vec<Expression> = seed.children().to_vec();
    for (position, child_pattern) in pattern.children().iter().enumerate() {
        let instantiated = instantiate(child_pattern, env)?;
        match children.get_mut(position) {
            Some(slot) => *slot = instantiated,
            None => children.push(instantiated),
        }
    }

    Ok(Expression::new(
        seed.name().to_string(),
        seed.property().clone(),
        children,
    ))
}
