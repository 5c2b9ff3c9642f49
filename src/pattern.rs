//! The pattern language.
//!
//! A [`Pattern`] mirrors the shape of an [`Expression`](crate::expression::Expression)
//! it is meant to match. Each node is either a literal anchor (matches iff
//! the expression equals it exactly) or a typed capture hole (binds the
//! matched subexpression to an index), with an optional name constraint
//! and an optional strict-arity flag.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::PatternError;
use crate::expression::Expression;
use crate::property::Property;

/// What a pattern node does when a subexpression reaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Captures the matched subexpression under this index.
    Index(usize),
    /// Matches iff the expression is structurally equal to this literal.
    Literal(Expression),
    /// Neither a capture nor an anchor: an uncaptured shape constraint.
    ///
    /// Tolerated while matching, but `Rule::new` rejects it in an output
    /// pattern, since there would be nothing to instantiate from.
    None,
}

impl Binding {
    /// Returns the capture index, if this binding is one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Binding::Index(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the literal expression, if this binding is one.
    pub fn literal(&self) -> Option<&Expression> {
        match self {
            Binding::Literal(expr) => Some(expr),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct PatternNode {
    name: Option<String>,
    property: Property,
    binding: Binding,
    children: Vec<Pattern>,
    check_labels: bool,
}

/// A node in the pattern tree.
///
/// Cheap to clone; shared by reference across rules the same way
/// [`Property`] and [`Expression`] are.
#[derive(Debug, Clone)]
pub struct Pattern(Arc<PatternNode>);

impl Pattern {
    /// Constructs a pattern node.
    ///
    /// `index` and `literal` are mutually exclusive; supplying both is a
    /// [`PatternError::BothIndexAndLiteral`]. Supplying neither is
    /// accepted and produces an uncaptured shape constraint. When
    /// `literal` is supplied, its property must be a (shallow) subtype of
    /// `property`, or construction fails with
    /// [`PatternError::LiteralPropertyMismatch`].
    pub fn new(
        name: Option<String>,
        property: Property,
        index: Option<usize>,
        literal: Option<Expression>,
        children: Vec<Pattern>,
        check_labels: bool,
    ) -> Result<Self, PatternError> {
        let binding = match (index, literal) {
            (Some(_), Some(_)) => return Err(PatternError::BothIndexAndLiteral),
            (Some(i), None) => Binding::Index(i),
            (None, Some(expr)) => {
                if !expr.property().inherits(std::slice::from_ref(&property), false) {
                    return Err(PatternError::LiteralPropertyMismatch {
                        literal_full_name: expr.property().full_name().to_string(),
                        pattern_full_name: property.full_name().to_string(),
                    });
                }
                Binding::Literal(expr)
            }
            (None, None) => Binding::None,
        };

        Ok(Pattern(Arc::new(PatternNode {
            name,
            property,
            binding,
            children,
            check_labels,
        })))
    }

    /// Convenience constructor for a capture hole: no name constraint, no
    /// children, non-strict arity.
    pub fn hole(property: Property, index: usize) -> Self {
        Pattern::new(None, property, Some(index), None, Vec::new(), false)
            .expect("a bare index hole is always valid")
    }

    /// The optional name constraint: if present, a matching expression's
    /// name must equal it exactly.
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// The property a matching expression must be a subtype of.
    pub fn property(&self) -> &Property {
        &self.0.property
    }

    /// What this node does with a matched subexpression.
    pub fn binding(&self) -> &Binding {
        &self.0.binding
    }

    /// The sub-patterns expected at each operand position.
    pub fn children(&self) -> &[Pattern] {
        &self.0.children
    }

    /// Whether extra expression children beyond `children().len()` are
    /// disallowed at this node.
    pub fn check_labels(&self) -> bool {
        self.0.check_labels
    }

    /// In-order list of every capture index occurring in the pattern,
    /// duplicates preserved.
    pub fn index_list(&self) -> Vec<usize> {
        let mut indices = Vec::new();
        self.collect_indices(&mut indices);
        indices
    }

    fn collect_indices(&self, out: &mut Vec<usize>) {
        if let Binding::Index(i) = &self.0.binding {
            out.push(*i);
        }
        for child in self.children() {
            child.collect_indices(out);
        }
    }

    /// Whether the pattern is linear: every index occurs at most once.
    pub fn index_uniqueness(&self) -> bool {
        let indices = self.index_list();
        let unique: std::collections::HashSet<_> = indices.iter().collect();
        unique.len() == indices.len()
    }

    /// In-order list of `(index, pattern)` pairs for every capture hole in
    /// the tree, self first, then children left to right.
    fn patterns_of_index_raw(&self) -> Vec<(usize, Pattern)> {
        let mut raw = Vec::new();
        if let Binding::Index(i) = &self.0.binding {
            raw.push((*i, self.clone()));
        }
        for child in self.children() {
            raw.extend(child.patterns_of_index_raw());
        }
        raw
    }

    /// Whether every occurrence of the same capture index names
    /// structurally-equal pattern nodes.
    pub fn indices_have_consistent_patterns(&self) -> bool {
        let raw = self.patterns_of_index_raw();
        let mut seen: HashMap<usize, Pattern> = HashMap::new();

        for (index, pattern) in raw {
            match seen.get(&index) {
                Some(existing) if *existing != pattern => return false,
                Some(_) => {}
                None => {
                    seen.insert(index, pattern);
                }
            }
        }

        true
    }

    /// Builds a dense array indexed by capture index, sized `max_index +
    /// 1` so the slot at `max_index` itself is addressable. Returns
    /// `ok = false` if indices are inconsistent.
    pub fn patterns_of_indices(&self) -> (Vec<Option<Pattern>>, bool) {
        if !self.indices_have_consistent_patterns() {
            return (Vec::new(), false);
        }

        let raw = self.patterns_of_index_raw();
        let Some(max_index) = raw.iter().map(|(index, _)| *index).max() else {
            return (Vec::new(), true);
        };

        let mut slots: Vec<Option<Pattern>> = vec![None; max_index + 1];
        for (index, pattern) in raw {
            slots[index] = Some(pattern);
        }

        (slots, true)
    }

    /// The canonical pattern sub-tree bound to `index`, if indices are
    /// consistent and `index` occurs in the pattern.
    pub fn pattern_at(&self, index: usize) -> Option<Pattern> {
        let (slots, ok) = self.patterns_of_indices();
        if !ok {
            return None;
        }
        slots.get(index).cloned().flatten()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
            && self.property() == other.property()
            && self.binding() == other.binding()
            && self.check_labels() == other.check_labels()
            && self.children() == other.children()
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name().unwrap_or("None");
        match self.binding() {
            Binding::Index(i) => write!(f, "[{name}<{i}>]")?,
            Binding::Literal(expr) => write!(f, "[{name}<{}>]", expr.name())?,
            Binding::None => write!(f, "[{name}<>]")?,
        }
        write!(f, "(")?;
        for (i, child) in self.children().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> Property {
        Property::new("Operator", vec![])
    }

    #[test]
    fn both_index_and_literal_is_rejected() {
        let property = operator();
        let literal = Expression::new("X", property.clone(), vec![]);
        let err = Pattern::new(None, property, Some(0), Some(literal), vec![], false)
            .unwrap_err();
        assert_eq!(err, PatternError::BothIndexAndLiteral);
    }

    #[test]
    fn literal_must_inherit_declared_property() {
        let operator = operator();
        let unrelated = Property::new("Unrelated", vec![]);
        let literal = Expression::new("X", unrelated, vec![]);
        let err = Pattern::new(None, operator, None, Some(literal), vec![], false)
            .unwrap_err();
        assert!(matches!(err, PatternError::LiteralPropertyMismatch { .. }));
    }

    #[test]
    fn index_list_preserves_duplicates_and_order() {
        let property = operator();
        let hole0 = Pattern::hole(property.clone(), 0);
        let hole1 = Pattern::hole(property.clone(), 1);
        let hole0_again = Pattern::hole(property.clone(), 0);
        let root = Pattern::new(
            None,
            property,
            None,
            None,
            vec![hole0, hole1, hole0_again],
            false,
        )
        .unwrap();

        assert_eq!(root.index_list(), vec![0, 1, 0]);
        assert!(!root.index_uniqueness());
    }

    #[test]
    fn patterns_of_indices_sizes_to_max_plus_one() {
        let property = operator();
        let hole0 = Pattern::hole(property.clone(), 0);
        let (slots, ok) = hole0.patterns_of_indices();
        assert!(ok);
        assert_eq!(slots.len(), 1);
        assert!(slots[0].is_some());
    }

    #[test]
    fn inconsistent_indices_detected() {
        let a = operator();
        let b = Property::new("Other", vec![]);
        let hole_a = Pattern::hole(a, 0);
        let hole_b = Pattern::hole(b, 0);
        let root = Pattern::new(None, Property::new("Root", vec![]), None, None, vec![hole_a, hole_b], false)
            .unwrap();

        assert!(!root.indices_have_consistent_patterns());
        assert_eq!(root.patterns_of_indices().1, false);
    }
}
