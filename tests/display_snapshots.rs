//! Snapshot tests pinning the `Display` rendering of expressions,
//! patterns, and rules.

use rewrit::{Expression, Pattern, Property, Rule};

#[test]
fn expression_display_is_depth_first() {
    let operator = Property::new("Operator", vec![]);
    let x = Expression::new("X", operator.clone(), vec![]);
    let y = Expression::new("Y", operator.clone(), vec![]);
    let f = Expression::new("f", operator, vec![x, y]);

    insta::assert_snapshot!(f.to_string(), @"f(X(), Y())");
}

#[test]
fn property_display_default_format_omits_hash() {
    let operator = Property::new("Operator", vec![]);
    let hermitian = Property::new("Hermitian", vec![operator]);

    insta::assert_snapshot!(hermitian.to_string(), @"Hermitian");
}

#[test]
fn pattern_display_shows_name_and_binding() {
    let operator = Property::new("Operator", vec![]);
    let hole = Pattern::hole(operator.clone(), 0);
    let wrapper = Pattern::new(
        Some("f".to_string()),
        operator,
        None,
        None,
        vec![hole],
        false,
    )
    .unwrap();

    insta::assert_snapshot!(wrapper.to_string(), @"[f<>]([None<0>]())");
}

#[test]
fn pattern_display_shows_literal_anchor_name_not_full_rendering() {
    let operator = Property::new("Operator", vec![]);
    let x = Expression::new("X", operator.clone(), vec![]);
    let literal = Expression::new("f", operator.clone(), vec![x]);
    let anchored = Pattern::new(Some("name".to_string()), operator, None, Some(literal), vec![], false)
        .unwrap();

    insta::assert_snapshot!(anchored.to_string(), @"[name<f>]()");
}

#[test]
fn rule_display_shows_name_and_pattern_names() {
    let operator = Property::new("Operator", vec![]);
    let input = Pattern::new(
        Some("in".to_string()),
        operator.clone(),
        Some(0),
        None,
        vec![],
        false,
    )
    .unwrap();
    let output = Pattern::new(
        Some("out".to_string()),
        operator,
        Some(0),
        None,
        vec![],
        false,
    )
    .unwrap();
    let rule = Rule::new("rename", input, output).unwrap();

    insta::assert_snapshot!(rule.to_string(), @"rename:(in->out)");
}
