use itertools::Itertools;

use crate::ast::Node;

/// Structural signature of `node` that ignores the order of `And`/`Or` children.
///
/// Two nodes with equal keys are the same expression up to commutativity of
/// conjunction and disjunction.
pub fn canonical_key(node: &Node) -> String {
    match node {
        Node::Const(value) => format!("CONST({})", u8::from(*value)),
        Node::Var(name) => format!("VAR({name})"),
        Node::Not(child) => format!("NOT({})", canonical_key(child)),
        Node::And(children) => format!("AND({})", sorted_keys(children)),
        Node::Or(children) => format!("OR({})", sorted_keys(children)),
        Node::Xor(left, right) => {
            format!("XOR({},{})", canonical_key(left), canonical_key(right))
        }
    }
}

fn sorted_keys(children: &[Node]) -> String {
    children.iter().map(canonical_key).sorted().join(",")
}

impl Node {
    /// Whether `self` and `other` are equal up to the order of `And`/`Or` children.
    pub fn equivalent_to(&self, other: &Node) -> bool {
        canonical_key(self) == canonical_key(other)
    }
}

/// Keeps the first of every group of children sharing a canonical key.
pub fn dedupe(children: Vec<Node>) -> Vec<Node> {
    children.into_iter().unique_by(canonical_key).collect()
}

/// Whether some child is the negation of another child.
pub fn contains_complement(children: &[Node]) -> bool {
    let keys = children.iter().map(canonical_key).collect::<Vec<_>>();

    children.iter().any(|child| match child {
        Node::Not(inner) => keys.contains(&canonical_key(inner)),
        _ => false,
    })
}
