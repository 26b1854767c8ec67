use std::fmt::Display;

use itertools::Itertools;

use crate::ast::Node;

const OR_PRECEDENCE: u8 = 1;
const XOR_PRECEDENCE: u8 = 2;
const AND_PRECEDENCE: u8 = 3;
const NOT_PRECEDENCE: u8 = 4;
const LEAF_PRECEDENCE: u8 = 5;

/// Renders `node` as infix text with the fewest parentheses that still parse back
/// to the same tree.
pub fn render(node: &Node) -> String {
    node.to_string()
}

impl Node {
    pub fn precedence(&self) -> u8 {
        match self {
            Node::Or(_) => OR_PRECEDENCE,
            Node::Xor(_, _) => XOR_PRECEDENCE,
            Node::And(_) => AND_PRECEDENCE,
            Node::Not(_) => NOT_PRECEDENCE,
            Node::Const(_) | Node::Var(_) => LEAF_PRECEDENCE,
        }
    }

    fn wrapped(&self, required: u8) -> String {
        if self.precedence() < required {
            format!("({self})")
        } else {
            self.to_string()
        }
    }

    fn joined(children: &[Node], separator: &str, required: u8, empty: &str) -> String {
        match children.len() {
            0 => empty.to_owned(),
            _ => children
                .iter()
                .map(|child| child.wrapped(required))
                .join(separator),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Const(value) => write!(f, "{}", u8::from(*value)),
            Node::Var(name) => write!(f, "{name}"),
            Node::Not(child) => match child.as_ref() {
                Node::Const(_) | Node::Var(_) | Node::Not(_) => write!(f, "~{child}"),
                _ => write!(f, "~({child})"),
            },
            Node::And(children) => write!(
                f,
                "{}",
                Node::joined(children, " & ", AND_PRECEDENCE, "1")
            ),
            Node::Or(children) => {
                write!(f, "{}", Node::joined(children, " | ", OR_PRECEDENCE, "0"))
            }
            Node::Xor(left, right) => {
                // Xor parses left-associatively.
                let right = match right.as_ref() {
                    Node::Xor(_, _) => format!("({right})"),
                    _ => right.wrapped(XOR_PRECEDENCE),
                };

                write!(f, "{} ^ {}", left.wrapped(XOR_PRECEDENCE), right)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::parser::parse;

    fn var(name: &str) -> Node {
        Node::var(name)
    }

    #[test]
    fn test_leaves() {
        assert_eq!(render(&Node::Const(true)), "1");
        assert_eq!(render(&Node::Const(false)), "0");
        assert_eq!(render(&var("user_1")), "user_1");
    }

    #[test]
    fn test_negation() {
        assert_eq!(render(&Node::not(var("A"))), "~A");
        assert_eq!(render(&Node::not(Node::not(var("A")))), "~~A");
        assert_eq!(render(&Node::not(Node::Const(false))), "~0");
        assert_eq!(
            render(&Node::not(Node::and([var("A"), var("B")]))),
            "~(A & B)"
        );
        assert_eq!(
            render(&Node::not(Node::xor(var("A"), var("B")))),
            "~(A ^ B)"
        );
    }

    #[test]
    fn test_minimal_parentheses() {
        let node = Node::and([
            Node::or([var("A"), var("B")]),
            Node::xor(var("C"), var("D")),
            Node::not(var("E")),
        ]);

        assert_eq!(render(&node), "(A | B) & (C ^ D) & ~E");

        let node = Node::or([Node::and([var("A"), var("B")]), Node::xor(var("C"), var("D"))]);

        assert_eq!(render(&node), "A & B | C ^ D");
    }

    #[test]
    fn test_xor_operands() {
        assert_eq!(
            render(&Node::xor(Node::or([var("A"), var("B")]), var("C"))),
            "(A | B) ^ C"
        );
        assert_eq!(
            render(&Node::xor(Node::xor(var("A"), var("B")), var("C"))),
            "A ^ B ^ C"
        );
        assert_eq!(
            render(&Node::xor(var("A"), Node::xor(var("B"), var("C")))),
            "A ^ (B ^ C)"
        );
    }

    #[test]
    fn test_empty_connectives() {
        assert_eq!(render(&Node::And(vec![])), "1");
        assert_eq!(render(&Node::Or(vec![])), "0");
        assert_eq!(render(&Node::and([var("A")])), "A");
    }

    #[test]
    fn test_reparse() {
        for input in [
            "A & (B | C)",
            "~(A | B) ^ C",
            "A ^ (B ^ C)",
            "~~A | 0 & 1",
            "(A ^ B) & C",
        ] {
            let node = parse(input).unwrap();
            assert_eq!(parse(&render(&node)).unwrap(), node, "{input}");
        }
    }
}
