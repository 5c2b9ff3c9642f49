//! The property-inheritance lattice.
//!
//! A [`Property`] is a type-like tag attached to every [`Expression`](crate::expression::Expression).
//! Properties form a lattice through direct parent references; subtyping
//! ("inherits") is an upward walk through that lattice.
//!
//! Two properties compare equal iff their [`full_name`](Property::full_name)
//! strings match — identity of the underlying allocation is not
//! significant, so the same logical property can be constructed more than
//! once and still compare equal to itself.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::fmt::Format;

#[derive(Debug)]
struct PropertyNode {
    name: String,
    parents: Vec<Property>,
    full_name: String,
    hash: u64,
}

/// A node in the property-inheritance lattice.
///
/// Cheap to clone (an `Arc` bump) and shared by reference across many
/// expressions, as its Lifecycle note in the data model requires.
#[derive(Debug, Clone)]
pub struct Property(Arc<PropertyNode>);

impl Property {
    /// Constructs a property with the given name, inheriting directly from
    /// `parents` in the given order.
    ///
    /// `full_name` and its hash are computed once, here, and cached for
    /// the lifetime of the property.
    pub fn new(name: impl Into<String>, parents: Vec<Property>) -> Self {
        let name = name.into();
        let full_name = Self::compute_full_name(&name, &parents);
        let hash = Self::compute_hash(&full_name);

        Property(Arc::new(PropertyNode {
            name,
            parents,
            full_name,
            hash,
        }))
    }

    /// Constructs a synthetic `"λ"`-named property inheriting from several
    /// parents simultaneously.
    ///
    /// Lets a single expression satisfy several otherwise-unrelated
    /// property constraints through one attached property.
    pub fn anonymous(parents: Vec<Property>) -> Self {
        Property::new("\u{3bb}", parents)
    }

    fn compute_full_name(name: &str, parents: &[Property]) -> String {
        let inner = parents
            .iter()
            .map(|parent| parent.full_name().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{name}({inner})")
    }

    fn compute_hash(full_name: &str) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        full_name.hash(&mut hasher);
        hasher.finish()
    }

    /// The property's own name, without its inheritance.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The properties this one directly inherits from, in declaration
    /// order.
    pub fn parents(&self) -> &[Property] {
        &self.0.parents
    }

    /// `name(parent1.full_name, parent2.full_name, …)`, cached at
    /// construction.
    pub fn full_name(&self) -> &str {
        &self.0.full_name
    }

    /// Content hash of `full_name`, used internally and by the matcher's
    /// collision check machinery as a fast pre-filter.
    pub(crate) fn content_hash(&self) -> u64 {
        self.0.hash
    }

    /// Returns the ancestors (including `self`) of this property that
    /// appear in `targets`, walking the lattice iteratively with an
    /// explicit work stack (the lattice may be wide).
    ///
    /// - If `self` is in `targets`: `self` is included. When `deep` is
    ///   `false`, the walk does not continue past `self` into its
    ///   parents; when `deep` is `true`, it does.
    /// - If `self` is not in `targets`: `self` is not included, but the
    ///   walk always continues into its parents regardless of `deep`.
    ///
    /// Encounter order is preserved, and so are duplicates: a diamond
    /// lattice walked with `deep = true` can report the same ancestor
    /// more than once, by design.
    pub fn ancestors_containing(&self, targets: &[Property], deep: bool) -> Vec<Property> {
        let mut result = Vec::new();
        let mut stack = vec![self.clone()];

        while let Some(node) = stack.pop() {
            let is_target = targets.iter().any(|target| *target == node);

            if is_target {
                result.push(node.clone());
                if !deep {
                    continue;
                }
            }

            for parent in node.parents().iter().rev() {
                stack.push(parent.clone());
            }
        }

        result
    }

    /// Whether the multiset of ancestors found by
    /// [`ancestors_containing`](Self::ancestors_containing) equals the
    /// multiset `targets` — i.e. every target property is reachable at
    /// least once in this property's upward cone (and nothing else was
    /// reported in excess).
    ///
    /// For a singleton `targets`, this reduces to "self equals the
    /// target, or some ancestor does".
    pub fn inherits(&self, targets: &[Property], deep: bool) -> bool {
        multiset_eq(&self.ancestors_containing(targets, deep), targets)
    }

    /// Renders this property using an explicit [`Format`] rather than a
    /// process-wide toggle, so two callers can format the same property
    /// differently without stepping on each other.
    pub fn display(&self, format: Format) -> String {
        if format.print_hash {
            format!("{}<{}>", self.name(), self.0.hash)
        } else {
            self.name().to_string()
        }
    }
}

fn multiset_eq(found: &[Property], targets: &[Property]) -> bool {
    if found.len() != targets.len() {
        return false;
    }

    let mut remaining: Vec<&Property> = targets.iter().collect();
    for item in found {
        match remaining.iter().position(|candidate| *item == **candidate) {
            Some(pos) => {
                remaining.remove(pos);
            }
            None => return false,
        }
    }

    true
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.full_name() == other.full_name()
    }
}

impl Eq for Property {}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash.hash(state);
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(Format::default()))
    }
}
