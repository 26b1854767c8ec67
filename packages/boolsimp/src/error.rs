use thiserror::Error;

use crate::{lexer::Token, parser::MAX_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{character}' at offset {position}")]
    UnexpectedCharacter { character: char, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found} (token #{position})")]
    UnexpectedToken {
        found: Token,
        expected: &'static str,
        position: usize,
    },
    #[error("unconsumed input starting at {found} (token #{position})")]
    TrailingInput { found: Token, position: usize },
    #[error("expression nests deeper than {} levels (token #{position})", MAX_DEPTH)]
    TooDeep { position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluateError {
    #[error("variable '{0}' has no value in the interpretation")]
    UnboundVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("simplification did not reach a fixpoint within {limit} iterations")]
    IterationLimit { limit: usize },
}
