use enum_as_inner::EnumAsInner;
use indexmap::IndexSet;
use termtree::Tree;

/// A propositional expression over named binary variables.
///
/// `And`/`Or` are variadic; once normalized they hold no child of their own kind.
/// `Xor` stays binary.
#[derive(Debug, Clone, Hash, PartialEq, Eq, EnumAsInner)]
pub enum Node {
    Const(bool),
    Var(String),
    Not(Box<Node>),
    And(Vec<Node>),
    Or(Vec<Node>),
    Xor(Box<Node>, Box<Node>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet(pub IndexSet<String>);

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Const(value)
    }
}

impl Node {
    pub fn var(name: impl Into<String>) -> Self {
        Node::Var(name.into())
    }

    pub fn not(node: Node) -> Self {
        Node::Not(Box::new(node))
    }

    pub fn and(children: impl IntoIterator<Item = Node>) -> Self {
        Node::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Or(children.into_iter().collect())
    }

    pub fn xor(left: Node, right: Node) -> Self {
        Node::Xor(Box::new(left), Box::new(right))
    }

    pub fn negated(&self) -> Self {
        Node::not(self.clone())
    }

    pub fn symbol(&self) -> &str {
        match self {
            Node::Const(true) => "1",
            Node::Const(false) => "0",
            Node::Var(name) => name,
            Node::Not(_) => "~",
            Node::And(_) => "&",
            Node::Or(_) => "|",
            Node::Xor(_, _) => "^",
        }
    }

    /// Number of nodes in the tree, the node itself included.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Node::Const(_) | Node::Var(_) => 0,
            Node::Not(child) => child.node_count(),
            Node::And(children) | Node::Or(children) => {
                children.iter().map(Node::node_count).sum()
            }
            Node::Xor(left, right) => left.node_count() + right.node_count(),
        }
    }

    /// Variables in order of first appearance.
    pub fn variables(&self) -> VariableSet {
        let mut variables = VariableSet::default();
        self.collect_variables(&mut variables.0);
        variables
    }

    fn collect_variables(&self, variables: &mut IndexSet<String>) {
        match self {
            Node::Const(_) => {}
            Node::Var(name) => {
                variables.insert(name.clone());
            }
            Node::Not(child) => child.collect_variables(variables),
            Node::And(children) | Node::Or(children) => {
                for child in children {
                    child.collect_variables(variables);
                }
            }
            Node::Xor(left, right) => {
                left.collect_variables(variables);
                right.collect_variables(variables);
            }
        }
    }

    pub fn get_tree(&self) -> Tree<String> {
        let symbol = self.symbol().to_owned();

        match self {
            Node::Const(_) | Node::Var(_) => Tree::new(symbol),
            Node::Not(child) => Tree::new(symbol).with_leaves(vec![child.get_tree()]),
            Node::And(children) | Node::Or(children) => {
                Tree::new(symbol).with_leaves(children.iter().map(|child| child.get_tree()))
            }
            Node::Xor(left, right) => {
                Tree::new(symbol).with_leaves(vec![left.get_tree(), right.get_tree()])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_node_count() {
        let node = Node::or([
            Node::and([Node::var("A"), Node::var("B")]),
            Node::not(Node::var("A")),
        ]);

        assert_eq!(node.node_count(), 6);
        assert_eq!(Node::from(true).node_count(), 1);
    }

    #[test]
    fn test_variables_in_order_of_appearance() {
        let node = Node::xor(
            Node::and([Node::var("C"), Node::var("A")]),
            Node::or([Node::var("A"), Node::not(Node::var("B")), false.into()]),
        );

        assert_eq!(
            node.variables().0.into_iter().collect::<Vec<_>>(),
            vec!["C", "A", "B"]
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Node::and([Node::var("A"), Node::var("B")]);
        let mut copy = original.clone();

        if let Node::And(children) = &mut copy {
            children.push(Node::var("C"));
        }

        assert_eq!(original.as_and().map(Vec::len), Some(2));
        assert_eq!(copy.as_and().map(Vec::len), Some(3));
    }

    #[test]
    fn test_tree() {
        let node = Node::not(Node::and([Node::var("A"), true.into()]));

        assert_eq!(
            node.get_tree().to_string().lines().collect::<Vec<_>>(),
            vec!["~", "└── &", "    ├── A", "    └── 1"]
        );
    }
}
