//! Error types for the rewrite engine.
//!
//! This module defines all error types raised by the core construction
//! entry points (`make_property` never fails; `make_pattern`, `make_rule`,
//! `instantiate`, and the lattice template builder can).
//!
//! # Error Categories
//!
//! - [`PatternError`]: raised by [`Pattern::new`](crate::pattern::Pattern::new)
//! - [`RuleError`]: raised by [`Rule::new`](crate::rule::Rule::new)
//! - [`SubstitutionError`]: raised by [`instantiate`](crate::matcher::instantiate)
//! - [`LatticeError`]: raised by the lattice template builder
//!
//! `apply_rule` itself never fails: a rule that does not match an
//! expression simply returns that expression unchanged.

use thiserror::Error;

/// Which side of a rule an index-consistency check failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The rule's input pattern.
    Input,
    /// The rule's output pattern.
    Output,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Input => write!(f, "input"),
            Side::Output => write!(f, "output"),
        }
    }
}

/// Errors that can occur while constructing a [`Pattern`](crate::pattern::Pattern).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    /// Both `index` and `literal` were supplied to [`Pattern::new`](crate::pattern::Pattern::new).
    ///
    /// A pattern node is either a capture hole or a literal anchor, never
    /// both.
    #[error("pattern node cannot carry both an index and a literal anchor")]
    BothIndexAndLiteral,

    /// A literal anchor's property is not a subtype of the pattern node's
    /// declared property.
    #[error(
        "literal '{literal_full_name}' does not inherit from declared property '{pattern_full_name}'"
    )]
    LiteralPropertyMismatch {
        /// Full name of the literal expression's property.
        literal_full_name: String,
        /// Full name of the pattern node's declared property.
        pattern_full_name: String,
    },

    /// A negative index was supplied.
    ///
    /// `Pattern::new` takes its index as `usize`, so this variant is
    /// unreachable through the typed constructor; it is kept as a
    /// documented invariant for any future entry point that accepts a
    /// signed index from an external format.
    #[error("capture index cannot be negative")]
    NegativeIndex,
}

/// Errors that can occur while constructing a [`Rule`](crate::rule::Rule).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// A side of the rule has inconsistent capture indices: some index
    /// occurs at pattern positions with different shapes.
    #[error("{side} pattern has inconsistent patterns for one or more capture indices")]
    InconsistentIndices {
        /// Which side failed the consistency check.
        side: Side,
    },

    /// The output pattern references an index the input pattern never
    /// binds.
    #[error("output pattern uses index {index} which the input pattern does not capture")]
    OutputIndexNotInInput {
        /// The offending index.
        index: usize,
    },

    /// The captured subterm at `index` is not a subtype of what the output
    /// pattern expects there (contravariant substitution check).
    #[error(
        "index {index}: input capture property '{input_full_name}' does not inherit from output's expected property '{output_full_name}'"
    )]
    PropertyVariance {
        /// The offending index.
        index: usize,
        /// Full name of the input side's property at this index.
        input_full_name: String,
        /// Full name of the output side's property at this index.
        output_full_name: String,
    },

    /// The output pattern's top-level property is not a subtype of the
    /// input pattern's top-level property (covariant result check).
    #[error(
        "output top-level property '{output_full_name}' does not inherit from input top-level property '{input_full_name}'"
    )]
    ResultNotSubtype {
        /// Full name of the input pattern's top-level property.
        input_full_name: String,
        /// Full name of the output pattern's top-level property.
        output_full_name: String,
    },

    /// An output pattern node carries neither an index nor a literal.
    ///
    /// Matching tolerates such a node as an uncaptured shape constraint,
    /// but a rewrite cannot be instantiated from it, so it is rejected at
    /// rule construction time rather than at rewrite time.
    #[error("output pattern node has neither an index nor a literal; every output node must bind one")]
    OutputRequiresBinding,
}

/// Raised by [`instantiate`](crate::matcher::instantiate) when it cannot
/// build an expression from a pattern node.
///
/// Neither variant should trigger for a rule accepted by
/// [`Rule::new`](crate::rule::Rule::new); both exist as defensive guards
/// for patterns instantiated outside of `Rule::apply`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubstitutionError {
    /// The pattern references an index absent from the capture
    /// environment.
    #[error("no binding for capture index {index} in the environment")]
    MissingBinding {
        /// The missing index.
        index: usize,
    },

    /// A pattern node carries neither an index nor a literal, so there is
    /// nothing to instantiate it from.
    #[error("pattern node has neither an index nor a literal to instantiate from")]
    UnboundNode,
}

/// Raised by the lattice template builder when two template nodes share a
/// name.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("two or more properties in the template share the name '{name}'")]
pub struct LatticeError {
    /// The duplicated name.
    pub name: String,
}
