use std::fmt::Display;

use log::trace;
use serde::{Serialize, Serializer};
use strum::{EnumIter, IntoStaticStr};

use crate::ast::Node;

/// A Boolean-algebra law the simplifier can apply.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, IntoStaticStr, EnumIter,
)]
pub enum Rule {
    #[strum(serialize = "Double negation (~~X = X)")]
    DoubleNegation,
    #[strum(serialize = "De Morgan (~(X & Y) = ~X | ~Y)")]
    DeMorganAnd,
    #[strum(serialize = "De Morgan (~(X | Y) = ~X & ~Y)")]
    DeMorganOr,
    #[strum(serialize = "Constant complement (~1 = 0, ~0 = 1)")]
    ConstantComplement,

    #[strum(serialize = "AND identity (X & 1 = X)")]
    AndIdentity,
    #[strum(serialize = "AND annulment (X & 0 = 0)")]
    AndAnnulment,
    #[strum(serialize = "AND idempotence (X & X = X)")]
    AndIdempotence,
    #[strum(serialize = "AND complement (X & ~X = 0)")]
    AndComplement,
    #[strum(serialize = "AND absorption (X & (X | Y) = X)")]
    AndAbsorption,
    #[strum(serialize = "AND distribution, common factor ((X | Y) & (X | Z) = X | (Y & Z))")]
    AndDistribution,

    #[strum(serialize = "OR identity (X | 0 = X)")]
    OrIdentity,
    #[strum(serialize = "OR annulment (X | 1 = 1)")]
    OrAnnulment,
    #[strum(serialize = "OR idempotence (X | X = X)")]
    OrIdempotence,
    #[strum(serialize = "OR complement (X | ~X = 1)")]
    OrComplement,
    #[strum(serialize = "OR absorption (X | (X & Y) = X)")]
    OrAbsorption,
    #[strum(serialize = "OR distribution, common factor ((X & Y) | (X & Z) = X & (Y | Z))")]
    OrDistribution,

    #[strum(serialize = "XOR identity (X ^ 0 = X)")]
    XorIdentity,
    #[strum(serialize = "XOR with 1 (X ^ 1 = ~X)")]
    XorWithOne,
    #[strum(serialize = "XOR cancellation (X ^ X = 0)")]
    XorCancellation,
}

/// One applied law, with the printed form of the rewritten subexpression before
/// and after.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Step {
    #[serde(serialize_with = "serialize_rule")]
    pub rule: Rule,
    pub before: String,
    pub after: String,
}

fn serialize_rule<S: Serializer>(rule: &Rule, serializer: S) -> Result<S::Ok, S::Error> {
    let name: &'static str = rule.into();
    serializer.serialize_str(name)
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {} => {}", self.rule, self.before, self.after)
    }
}

/// Receives the laws applied while rewriting an expression.
pub trait Explain {
    fn law(&mut self, rule: Rule, before: &Node, after: &Node);
}

/// Records every law whose application changed the printed expression.
impl Explain for Vec<Step> {
    fn law(&mut self, rule: Rule, before: &Node, after: &Node) {
        let before = before.to_string();
        let after = after.to_string();

        if before == after {
            return;
        }

        trace!("{rule}: {before} => {after}");

        self.push(Step {
            rule,
            before,
            after,
        });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardedExplanation;

impl Explain for DiscardedExplanation {
    fn law(&mut self, _rule: Rule, _before: &Node, _after: &Node) {}
}
