use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    ast::{Node, VariableSet},
    error::EvaluateError,
};

/// An assignment of truth values to variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interpretation(pub IndexMap<String, bool>);

impl Interpretation {
    /// Every assignment of `variables`, counting up in binary with the first
    /// variable as the most significant bit.
    pub fn generate_all(variables: VariableSet) -> impl Iterator<Item = Interpretation> {
        let n = variables.0.len();
        let interpretation_count = 1usize << n;

        (0..interpretation_count).map(move |i| {
            Interpretation(
                variables
                    .0
                    .iter()
                    .enumerate()
                    .map(|(position, variable)| {
                        (variable.clone(), (i >> (n - 1 - position)) & 1 == 1)
                    })
                    .collect(),
            )
        })
    }
}

impl Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let assignments = self
            .0
            .iter()
            .sorted_by(|(left, _), (right, _)| left.cmp(right))
            .map(|(variable, value)| format!("{}{variable}", if *value { "" } else { "~" }))
            .join(", ");

        write!(f, "{{{assignments}}}")
    }
}

pub trait Evaluate {
    fn evaluate(&self, interpretation: &Interpretation) -> Result<bool, EvaluateError>;
}

impl Evaluate for Node {
    fn evaluate(&self, interpretation: &Interpretation) -> Result<bool, EvaluateError> {
        Ok(match self {
            Node::Const(value) => *value,
            Node::Var(name) => *interpretation
                .0
                .get(name)
                .ok_or_else(|| EvaluateError::UnboundVariable(name.clone()))?,
            Node::Not(child) => !child.evaluate(interpretation)?,
            Node::And(children) => {
                for child in children {
                    if !child.evaluate(interpretation)? {
                        return Ok(false);
                    }
                }
                true
            }
            Node::Or(children) => {
                for child in children {
                    if child.evaluate(interpretation)? {
                        return Ok(true);
                    }
                }
                false
            }
            Node::Xor(left, right) => {
                left.evaluate(interpretation)? != right.evaluate(interpretation)?
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;
    use test_log::test;

    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_generate_all() {
        let node = parse("B & A").unwrap();
        let interpretations = Interpretation::generate_all(node.variables())
            .map(|interpretation| interpretation.to_string())
            .collect::<Vec<_>>();

        assert_eq!(
            interpretations,
            vec!["{~A, ~B}", "{A, ~B}", "{~A, B}", "{A, B}"]
        );
    }

    #[test]
    fn test_no_variables() {
        assert_eq!(
            Interpretation::generate_all(VariableSet::default()).count(),
            1
        );
    }

    #[test]
    fn test_evaluate() {
        let node = parse("A & ~B | (C ^ 1)").unwrap();
        let interpretation = Interpretation(indexmap! {
            "A".to_owned() => true,
            "B".to_owned() => true,
            "C".to_owned() => false,
        });

        assert_eq!(node.evaluate(&interpretation), Ok(true));

        let interpretation = Interpretation(indexmap! {
            "A".to_owned() => true,
            "B".to_owned() => true,
            "C".to_owned() => true,
        });

        assert_eq!(node.evaluate(&interpretation), Ok(false));
    }

    #[test]
    fn test_empty_connectives() {
        let interpretation = Interpretation::default();

        assert_eq!(Node::And(vec![]).evaluate(&interpretation), Ok(true));
        assert_eq!(Node::Or(vec![]).evaluate(&interpretation), Ok(false));
    }

    #[test]
    fn test_unbound_variable() {
        assert_eq!(
            parse("A | B").unwrap().evaluate(&Interpretation::default()),
            Err(EvaluateError::UnboundVariable("A".to_owned()))
        );
    }
}
