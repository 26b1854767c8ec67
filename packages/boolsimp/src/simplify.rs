use std::iter;

use itertools::Itertools;
use log::{debug, warn};

use crate::{
    ast::Node,
    canonical::{canonical_key, contains_complement, dedupe},
    error::Error,
    explanation::{DiscardedExplanation, Explain, Rule, Step},
};

/// Iterations allowed per node of the input when no explicit cap is configured.
pub const ITERATIONS_PER_NODE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplification {
    pub node: Node,
    pub steps: Vec<Step>,
}

impl Simplification {
    pub fn text(&self) -> String {
        self.node.to_string()
    }
}

/// Fixpoint driver: normalizes the input, then alternates [`step`] and
/// [`normalize`] until the printed expression stops changing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplifier {
    max_iterations: Option<usize>,
}

impl Simplifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of rewriting passes that may change the expression.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn iteration_limit(&self, node: &Node) -> usize {
        self.max_iterations
            .unwrap_or_else(|| ITERATIONS_PER_NODE * (node.node_count() + 1))
    }

    pub fn simplify(&self, node: &Node) -> Result<Simplification, Error> {
        let limit = self.iteration_limit(node);

        let mut steps = Vec::new();
        let mut current = normalize_explained(node, &mut steps);
        let mut text = current.to_string();
        let mut iterations = 0;

        debug!("normalized: {text}");

        loop {
            let mut iteration_steps = Vec::new();
            let stepped = normalize_explained(
                &step(&current, &mut iteration_steps),
                &mut iteration_steps,
            );
            let stepped_text = stepped.to_string();

            if stepped_text == text {
                debug!("fixpoint after {iterations} iteration(s): {text}");

                return Ok(Simplification {
                    node: current,
                    steps,
                });
            }

            iterations += 1;
            if iterations > limit {
                warn!("no fixpoint within {limit} iterations, last expression: {stepped_text}");

                return Err(Error::IterationLimit { limit });
            }

            debug!("iteration {iterations}: {stepped_text}");

            steps.extend(iteration_steps);
            current = stepped;
            text = stepped_text;
        }
    }
}

pub fn simplify(node: &Node) -> Result<Simplification, Error> {
    Simplifier::new().simplify(node)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

impl Connective {
    fn dual(self) -> Self {
        match self {
            Connective::And => Connective::Or,
            Connective::Or => Connective::And,
        }
    }

    /// The constant that leaves the connective unchanged: `1` for AND, `0` for OR.
    fn neutral(self) -> Node {
        Node::Const(self == Connective::And)
    }

    /// The constant that decides the connective on its own: `0` for AND, `1` for OR.
    fn absorbing(self) -> Node {
        Node::Const(self == Connective::Or)
    }

    fn build(self, children: Vec<Node>) -> Node {
        match self {
            Connective::And => Node::And(children),
            Connective::Or => Node::Or(children),
        }
    }

    /// Like [`Connective::build`], but without leaving empty or single-child nodes.
    fn collapse(self, mut children: Vec<Node>) -> Node {
        match children.len() {
            0 => self.neutral(),
            1 => children.remove(0),
            _ => self.build(children),
        }
    }

    fn children(self, node: &Node) -> Option<&Vec<Node>> {
        match self {
            Connective::And => node.as_and(),
            Connective::Or => node.as_or(),
        }
    }

    fn splice(self, node: Node) -> Vec<Node> {
        let children = match self {
            Connective::And => node.into_and(),
            Connective::Or => node.into_or(),
        };

        children.unwrap_or_else(|node| vec![node])
    }

    fn identity_rule(self) -> Rule {
        match self {
            Connective::And => Rule::AndIdentity,
            Connective::Or => Rule::OrIdentity,
        }
    }

    fn annulment_rule(self) -> Rule {
        match self {
            Connective::And => Rule::AndAnnulment,
            Connective::Or => Rule::OrAnnulment,
        }
    }

    fn idempotence_rule(self) -> Rule {
        match self {
            Connective::And => Rule::AndIdempotence,
            Connective::Or => Rule::OrIdempotence,
        }
    }

    fn complement_rule(self) -> Rule {
        match self {
            Connective::And => Rule::AndComplement,
            Connective::Or => Rule::OrComplement,
        }
    }

    fn absorption_rule(self) -> Rule {
        match self {
            Connective::And => Rule::AndAbsorption,
            Connective::Or => Rule::OrAbsorption,
        }
    }

    fn distribution_rule(self) -> Rule {
        match self {
            Connective::And => Rule::AndDistribution,
            Connective::Or => Rule::OrDistribution,
        }
    }
}

fn apply(explanation: &mut impl Explain, rule: Rule, before: &Node, after: Node) -> Node {
    explanation.law(rule, before, &after);
    after
}

pub fn normalize(node: &Node) -> Node {
    normalize_explained(node, &mut DiscardedExplanation)
}

/// Flattens nested conjunctions and disjunctions, removes neutral constants,
/// annuls on absorbing constants, drops duplicates and sorts children by their
/// printed text.
///
/// Identity, annulment and idempotence are reported to `explanation`; flattening
/// and reordering are not.
pub fn normalize_explained(node: &Node, explanation: &mut impl Explain) -> Node {
    match node {
        Node::Const(_) | Node::Var(_) => node.clone(),
        Node::Not(child) => Node::not(normalize_explained(child, explanation)),
        Node::And(children) => normalize_children(Connective::And, children, explanation),
        Node::Or(children) => normalize_children(Connective::Or, children, explanation),
        Node::Xor(left, right) => Node::xor(
            normalize_explained(left, explanation),
            normalize_explained(right, explanation),
        ),
    }
}

fn normalize_children(
    connective: Connective,
    children: &[Node],
    explanation: &mut impl Explain,
) -> Node {
    let children = children
        .iter()
        .flat_map(|child| connective.splice(normalize_explained(child, explanation)))
        .collect_vec();

    let absorbing = connective.absorbing();
    if children.contains(&absorbing) {
        return apply(
            explanation,
            connective.annulment_rule(),
            &connective.build(children),
            absorbing,
        );
    }

    let neutral = connective.neutral();
    let remaining = children
        .iter()
        .filter(|&child| *child != neutral)
        .cloned()
        .collect_vec();

    if remaining.len() != children.len() {
        explanation.law(
            connective.identity_rule(),
            &connective.build(children),
            &connective.collapse(remaining.clone()),
        );
    }

    if remaining.is_empty() {
        return neutral;
    }

    let unique = dedupe(remaining.clone());

    if unique.len() != remaining.len() {
        explanation.law(
            connective.idempotence_rule(),
            &connective.build(remaining),
            &connective.collapse(unique.clone()),
        );
    }

    connective.collapse(
        unique
            .into_iter()
            .sorted_by_cached_key(|child| child.to_string())
            .collect(),
    )
}

/// Applies at most one law at every node, children first.
pub fn step(node: &Node, explanation: &mut impl Explain) -> Node {
    match node {
        Node::Const(_) | Node::Var(_) => node.clone(),
        Node::Not(child) => step_negation(step(child, explanation), explanation),
        Node::And(children) => step_children(Connective::And, children, explanation),
        Node::Or(children) => step_children(Connective::Or, children, explanation),
        Node::Xor(left, right) => step_xor(
            step(left, explanation),
            step(right, explanation),
            explanation,
        ),
    }
}

fn step_negation(child: Node, explanation: &mut impl Explain) -> Node {
    let rewrite = match &child {
        Node::Not(inner) => Some((Rule::DoubleNegation, inner.as_ref().clone())),
        Node::And(children) => Some((
            Rule::DeMorganAnd,
            Node::Or(children.iter().map(Node::negated).collect()),
        )),
        Node::Or(children) => Some((
            Rule::DeMorganOr,
            Node::And(children.iter().map(Node::negated).collect()),
        )),
        Node::Const(value) => Some((Rule::ConstantComplement, Node::Const(!value))),
        Node::Var(_) | Node::Xor(_, _) => None,
    };

    let before = Node::not(child);

    match rewrite {
        Some((rule, after)) => apply(explanation, rule, &before, after),
        None => before,
    }
}

fn step_children(
    connective: Connective,
    children: &[Node],
    explanation: &mut impl Explain,
) -> Node {
    let children = children
        .iter()
        .map(|child| step(child, explanation))
        .collect_vec();
    let before = connective.build(children.clone());

    let neutral = connective.neutral();
    if children.contains(&neutral) {
        let remaining = children
            .into_iter()
            .filter(|child| *child != neutral)
            .collect_vec();

        return apply(
            explanation,
            connective.identity_rule(),
            &before,
            connective.collapse(remaining),
        );
    }

    let absorbing = connective.absorbing();
    if children.contains(&absorbing) {
        return apply(explanation, connective.annulment_rule(), &before, absorbing);
    }

    let unique = dedupe(children.clone());
    if unique.len() != children.len() {
        return apply(
            explanation,
            connective.idempotence_rule(),
            &before,
            connective.build(unique),
        );
    }

    if contains_complement(&children) {
        return apply(explanation, connective.complement_rule(), &before, absorbing);
    }

    if let Some(absorbed) = absorbed_child(connective, &children) {
        let remaining = children
            .into_iter()
            .enumerate()
            .filter(|&(index, _)| index != absorbed)
            .map(|(_, child)| child)
            .collect_vec();

        return apply(
            explanation,
            connective.absorption_rule(),
            &before,
            connective.collapse(remaining),
        );
    }

    if let Some(factored) = factor_common_child(connective, &children) {
        return apply(
            explanation,
            connective.distribution_rule(),
            &before,
            factored,
        );
    }

    before
}

/// Index of the first child of the dual connective that contains one of its
/// siblings, e.g. `X | Y` in `X & (X | Y)`.
fn absorbed_child(connective: Connective, children: &[Node]) -> Option<usize> {
    children.iter().enumerate().find_map(|(i, absorbing)| {
        let key = canonical_key(absorbing);

        children.iter().enumerate().find_map(|(j, candidate)| {
            let grandchildren = connective.dual().children(candidate)?;

            (i != j && grandchildren.iter().any(|g| canonical_key(g) == key)).then_some(j)
        })
    })
}

/// Factors a child shared by two children of the dual connective:
/// `(L | P) & (L | Q) & R` becomes `(L | (P & Q)) & R`, and dually for OR.
fn factor_common_child(connective: Connective, children: &[Node]) -> Option<Node> {
    let dual = connective.dual();

    let operands = children
        .iter()
        .enumerate()
        .filter_map(|(index, child)| {
            dual.children(child).map(|grandchildren| (index, grandchildren))
        })
        .collect_vec();

    for (position, &(first_index, first)) in operands.iter().enumerate() {
        for &(second_index, second) in &operands[position + 1..] {
            let second_keys = second.iter().map(canonical_key).collect_vec();

            let Some(common) = first
                .iter()
                .find(|&candidate| second_keys.contains(&canonical_key(candidate)))
            else {
                continue;
            };

            let key = canonical_key(common);
            let rest = |operand: &[Node]| {
                dual.collapse(
                    operand
                        .iter()
                        .filter(|&node| canonical_key(node) != key)
                        .cloned()
                        .collect(),
                )
            };

            let factored = dual.build(vec![
                common.clone(),
                connective.build(vec![rest(first.as_slice()), rest(second.as_slice())]),
            ]);

            let others = children
                .iter()
                .enumerate()
                .filter(|&(index, _)| index != first_index && index != second_index)
                .map(|(_, child)| child.clone());

            return Some(connective.collapse(iter::once(factored).chain(others).collect()));
        }
    }

    None
}

fn step_xor(left: Node, right: Node, explanation: &mut impl Explain) -> Node {
    let rewrite = match (&left, &right) {
        (_, Node::Const(false)) => Some((Rule::XorIdentity, left.clone())),
        (Node::Const(false), _) => Some((Rule::XorIdentity, right.clone())),
        (_, Node::Const(true)) => Some((Rule::XorWithOne, left.negated())),
        (Node::Const(true), _) => Some((Rule::XorWithOne, right.negated())),
        _ if left.equivalent_to(&right) => Some((Rule::XorCancellation, Node::Const(false))),
        _ => None,
    };

    let before = Node::xor(left, right);

    match rewrite {
        Some((rule, after)) => apply(explanation, rule, &before, after),
        None => before,
    }
}
