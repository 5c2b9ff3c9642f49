//! The expression term algebra.
//!
//! An [`Expression`] is an immutable node in a term tree: a name, a
//! [`Property`], and an ordered sequence of children. Expressions carry no
//! knowledge of patterns or rules; matching is always driven from the
//! pattern side (`matcher` module).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::property::Property;

#[derive(Debug)]
struct ExpressionNode {
    name: String,
    property: Property,
    children: Vec<Expression>,
    hash: OnceLock<u64>,
}

/// A node in an expression tree.
///
/// Cheap to clone (an `Arc` bump, not a deep copy). Expressions are never
/// mutated in place; a rewrite always builds fresh nodes.
#[derive(Debug, Clone)]
pub struct Expression(Arc<ExpressionNode>);

impl Expression {
    /// Constructs an expression node. Children order is semantically
    /// significant (operands are positional); no arity is enforced here
    /// (a pattern enforces what a rewrite needs).
    pub fn new(name: impl Into<String>, property: Property, children: Vec<Expression>) -> Self {
        Expression(Arc::new(ExpressionNode {
            name: name.into(),
            property,
            children,
            hash: OnceLock::new(),
        }))
    }

    /// The expression's opaque label.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The property attached to this node.
    pub fn property(&self) -> &Property {
        &self.0.property
    }

    /// The ordered operands of this expression.
    pub fn children(&self) -> &[Expression] {
        &self.0.children
    }

    /// A stable content hash derived from `name | property.full_name() |
    /// (children…)`, computed lazily and cached. Used by the matcher's
    /// collision check as a cheap inequality pre-filter; structural
    /// equality (`==`) is still the source of truth.
    pub fn content_hash(&self) -> u64 {
        *self.0.hash.get_or_init(|| self.compute_hash())
    }

    fn compute_hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.name().hash(&mut hasher);
        self.property().full_name().hash(&mut hasher);
        for child in self.children() {
            child.content_hash().hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
            && self.property() == other.property()
            && self.children() == other.children()
    }
}

impl Eq for Expression {}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, child) in self.children().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}
