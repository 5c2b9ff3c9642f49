//! Property-based tests for the universal properties every well-formed
//! rule/pattern/expression triple must satisfy.

use proptest::prelude::*;
use rewrit::{captures, check_shape, instantiate, Environment, Pattern, Property, Rule};

fn operator() -> Property {
    Property::new("Operator", vec![])
}

fn hermitian() -> Property {
    Property::new("Hermitian", vec![operator()])
}

fn leaf_expr(name: &str) -> rewrit::Expression {
    rewrit::Expression::new(name, hermitian(), vec![])
}

proptest! {
    /// Property 1: identity on mismatch.
    #[test]
    fn identity_on_mismatch(name in "[a-z]{1,8}") {
        let unrelated = Property::new("Unrelated", vec![]);
        let input = Pattern::hole(unrelated, 0);
        let output = Pattern::hole(Property::new("Unrelated", vec![]), 0);
        let rule = Rule::new("noop", input.clone(), output).unwrap();

        let expr = leaf_expr(&name);
        prop_assert!(!check_shape(&input, &expr));
        prop_assert_eq!(rule.apply(&expr), expr);
    }

    /// Property 2: non-linear consistency.
    #[test]
    fn non_linear_consistency(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        prop_assume!(a != b);
        let add = Property::new("Add", vec![]);
        let hole = Pattern::hole(operator(), 0);
        let pattern = Pattern::new(None, add.clone(), None, None, vec![hole.clone(), hole], false).unwrap();

        let x = leaf_expr(&a);
        let y = leaf_expr(&b);
        let mismatched = rewrit::Expression::new("Add", add, vec![x, y]);

        let (_, consistent) = captures(&pattern, &mismatched);
        prop_assert!(!consistent);
    }

    /// Property 3: capture completeness.
    #[test]
    fn capture_completeness(name in "[a-z]{1,8}") {
        let operator = operator();
        let hole0 = Pattern::hole(operator.clone(), 0);
        let hole1 = Pattern::hole(operator.clone(), 1);
        let pair = Property::new("Pair", vec![]);
        let pattern = Pattern::new(None, pair.clone(), None, None, vec![hole0, hole1], false).unwrap();

        let expr = rewrit::Expression::new(
            "Pair",
            pair,
            vec![leaf_expr(&name), leaf_expr(&name)],
        );

        let (records, ok) = captures(&pattern, &expr);
        prop_assert!(ok);
        let env: Environment = records.into_iter().collect();
        for index in pattern.index_list() {
            prop_assert!(env.contains_key(&index));
        }
    }

    /// Property 4: instantiation round-trip.
    #[test]
    fn instantiation_round_trip(name in "[a-z]{1,8}") {
        let hole = Pattern::hole(hermitian(), 0);
        let expr = leaf_expr(&name);

        let (records, ok) = captures(&hole, &expr);
        prop_assert!(ok);
        let env: Environment = records.into_iter().collect();
        let rebuilt = instantiate(&hole, &env).unwrap();
        prop_assert_eq!(rebuilt, expr);
    }

    /// Property 5: rewrite typing.
    #[test]
    fn rewrite_typing(name in "[a-z]{1,8}") {
        let operator = operator();
        let function = Property::new("Function", vec![operator.clone()]);
        let input = Pattern::hole(operator.clone(), 0);
        let output = Pattern::new(
            Some("f".to_string()),
            function.clone(),
            None,
            None,
            vec![Pattern::hole(operator, 0)],
            false,
        )
        .unwrap();
        let rule = Rule::new("wrap", input, output).unwrap();

        let expr = leaf_expr(&name);
        let rewritten = rule.apply(&expr);
        prop_assert_ne!(&rewritten, &expr);
        prop_assert!(rewritten.property().inherits(std::slice::from_ref(&function), false));
    }

    /// Property 9: index-0 usability.
    #[test]
    fn index_zero_usability(name in "[a-z]{1,8}") {
        let hole = Pattern::hole(operator(), 0);
        let e0 = rewrit::Expression::new(name.clone(), operator(), vec![]);

        let (records, ok) = captures(&hole, &e0);
        prop_assert!(ok);
        let env: Environment = records.into_iter().collect();
        prop_assert_eq!(env.get(&0), Some(&e0));
        prop_assert_eq!(instantiate(&hole, &env).unwrap(), e0);
    }
}

/// Property 6: literal anchor precedence — a decoy child must never be
/// visited once a literal anchor wins the node.
#[test]
fn literal_anchor_precedence() {
    let hermitian = hermitian();
    let x = rewrit::Expression::new("X", hermitian.clone(), vec![]);
    let decoy = Pattern::hole(hermitian.clone(), 77);
    let pattern = Pattern::new(None, hermitian, None, Some(x.clone()), vec![decoy], false).unwrap();

    assert!(check_shape(&pattern, &x));
    let (records, ok) = captures(&pattern, &x);
    assert!(ok);
    assert!(records.is_empty());
}

/// Property 7: property-lattice subtyping.
#[test]
fn property_lattice_subtyping() {
    let operator = operator();
    let hermitian = hermitian();
    let unrelated = Property::new("Unrelated", vec![]);

    assert!(hermitian.inherits(std::slice::from_ref(&operator), false));
    assert!(hermitian.inherits(std::slice::from_ref(&operator), true));
    assert!(!hermitian.inherits(std::slice::from_ref(&unrelated), false));
    assert!(!hermitian.inherits(std::slice::from_ref(&unrelated), true));
}

/// Property 8: anonymous composite.
#[test]
fn anonymous_composite() {
    let a = Property::new("A", vec![]);
    let b = Property::new("B", vec![]);
    let composite = Property::anonymous(vec![a.clone(), b.clone()]);

    assert!(composite.inherits(std::slice::from_ref(&a), false));
    assert!(composite.inherits(std::slice::from_ref(&b), false));
}
