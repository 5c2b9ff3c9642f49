//! A symbolic term-rewriting engine over a typed property-inheritance
//! lattice.
//!
//! # Data flow
//!
//! 1. [`lattice::build_property_tree`] or [`lattice::build_property_map`]
//!    turns a [`lattice::Template`] into [`property::Property`] values,
//!    each singly inheriting from its template parent. Client code is
//!    free to skip this and call [`property::Property::new`] directly —
//!    the lattice builder is the one external collaborator this crate
//!    ships, not a required entry point.
//! 2. [`expression::Expression`] values are built directly from a name, a
//!    `Property`, and child expressions; they carry no knowledge of
//!    patterns.
//! 3. [`pattern::Pattern::new`] builds a pattern tree shaped like the
//!    expressions it is meant to match, with capture holes
//!    ([`pattern::Binding::Index`]) and literal anchors
//!    ([`pattern::Binding::Literal`]) at its leaves.
//! 4. [`rule::Rule::new`] pairs an input pattern with an output pattern,
//!    checking the well-formedness conditions that let
//!    [`rule::Rule::apply`] run without ever failing: shape matching
//!    ([`matcher::check_shape`]), capture collection with collision
//!    detection ([`matcher::captures`]), and substitution
//!    ([`matcher::instantiate`]) are the primitives `apply` composes, and
//!    are also exposed directly for callers that want to drive matching
//!    themselves (a custom search strategy, say — this crate has no
//!    opinion on one).
//!
//! # Non-goals
//!
//! This crate has no opinion on search strategy, confluence, or
//! termination: it matches one rule against one expression and returns
//! one result. It has no unification and no associative-commutative
//! matching: a pattern's children match an expression's children
//! positionally, left to right. It has no notion of variable scope or
//! alpha-renaming: capture indices are global integers, not bound names.
//! It does not persist anything beyond the optional `serde` support on
//! [`lattice::Template`] — `Property`, `Expression`, `Pattern`, and
//! `Rule` are in-memory-only.

pub mod error;
pub mod expression;
pub mod fmt;
pub mod lattice;
pub mod matcher;
pub mod pattern;
pub mod property;
pub mod rule;

pub use error::{LatticeError, PatternError, RuleError, Side, SubstitutionError};
pub use expression::Expression;
pub use fmt::Format;
pub use lattice::{build_property_map, build_property_tree, PropertyTree, Template};
pub use matcher::{captures, check_shape, check_shape_local, instantiate, Environment, ShapeCheck};
pub use pattern::{Binding, Pattern};
pub use property::Property;
pub use rule::Rule;
