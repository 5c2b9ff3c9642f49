//! Rewrite rules.
//!
//! A [`Rule`] pairs an input pattern with an output pattern. Construction
//! performs the necessary (not sufficient) well-formedness checks that
//! let a validated rule always be applied without panicking.

use std::collections::HashSet;

use crate::error::{RuleError, Side};
use crate::expression::Expression;
use crate::matcher::{captures, check_shape, instantiate, Environment};
use crate::pattern::{Binding, Pattern};

/// A named, validated `(input, output)` pattern pair.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    input: Pattern,
    output: Pattern,
}

impl Rule {
    /// Constructs a rule, running [`check_valid`](Self::check_valid).
    ///
    /// Validity is a necessary, not sufficient, condition: it catches
    /// structurally unsound rules (inconsistent indices, an output
    /// referencing a capture the input never binds, variance mismatches)
    /// but does not prove the rule always does something sensible.
    pub fn new(
        name: impl Into<String>,
        input: Pattern,
        output: Pattern,
    ) -> Result<Self, RuleError> {
        check_valid(&input, &output)?;
        Ok(Rule {
            name: name.into(),
            input,
            output,
        })
    }

    /// The rule's name, used for identification and display only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern matched against a candidate expression.
    pub fn input(&self) -> &Pattern {
        &self.input
    }

    /// The pattern instantiated on a successful match.
    pub fn output(&self) -> &Pattern {
        &self.output
    }

    /// Attempts to rewrite `expr` with this rule.
    ///
    /// Never fails: a non-matching expression is returned unchanged by
    /// structural equality.
    pub fn apply(&self, expr: &Expression) -> Expression {
        if !check_shape(&self.input, expr) {
            return expr.clone();
        }

        let (records, consistent) = captures(&self.input, expr);
        if !consistent {
            return expr.clone();
        }

        let env: Environment = records.into_iter().collect();

        // A rule accepted by `Rule::new` always has a fully-bound output
        // pattern whose indices are all present in `env`, so this cannot
        // fail; fall back to identity rather than panic if it somehow did.
        instantiate(&self.output, &env).unwrap_or_else(|_| expr.clone())
    }
}

/// Runs the necessary well-formedness checks relating an output
/// pattern's capture indices and top-level property to the input
/// pattern's.
///
/// Reads `input`'s and `output`'s index structures independently, so an
/// index consistency failure is always attributed to the side that
/// actually has it.
fn check_valid(input: &Pattern, output: &Pattern) -> Result<(), RuleError> {
    if !every_node_is_bound(output) {
        return Err(RuleError::OutputRequiresBinding);
    }

    if !output
        .property()
        .inherits(std::slice::from_ref(input.property()), false)
    {
        return Err(RuleError::ResultNotSubtype {
            input_full_name: input.property().full_name().to_string(),
            output_full_name: output.property().full_name().to_string(),
        });
    }

    let (input_slots, input_ok) = input.patterns_of_indices();
    if !input_ok {
        return Err(RuleError::InconsistentIndices { side: Side::Input });
    }
    let (output_slots, output_ok) = output.patterns_of_indices();
    if !output_ok {
        return Err(RuleError::InconsistentIndices { side: Side::Output });
    }

    let input_indices: HashSet<usize> = input.index_list().into_iter().collect();
    let mut output_indices: Vec<usize> = output.index_list();
    output_indices.sort_unstable();
    output_indices.dedup();

    for index in output_indices {
        if !input_indices.contains(&index) {
            return Err(RuleError::OutputIndexNotInInput { index });
        }

        let input_pattern = input_slots[index]
            .as_ref()
            .expect("index present in input.index_list() must have a slot");
        let output_pattern = output_slots[index]
            .as_ref()
            .expect("index present in output.index_list() must have a slot");

        if !input_pattern
            .property()
            .inherits(std::slice::from_ref(output_pattern.property()), false)
        {
            return Err(RuleError::PropertyVariance {
                index,
                input_full_name: input_pattern.property().full_name().to_string(),
                output_full_name: output_pattern.property().full_name().to_string(),
            });
        }
    }

    Ok(())
}

fn every_node_is_bound(pattern: &Pattern) -> bool {
    !matches!(pattern.binding(), Binding::None)
        && pattern.children().iter().all(every_node_is_bound)
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:({}->{})",
            self.name,
            self.input.name().unwrap_or("None"),
            self.output.name().unwrap_or("None"),
        )
    }
}
