//! Parsing and step-by-step simplification of Boolean expressions.
//!
//! ```
//! let node = boolsimp::parse("(A & B) | (A & ~B)").unwrap();
//! let simplification = boolsimp::simplify(&node).unwrap();
//!
//! assert_eq!(boolsimp::render(&simplification.node), "A");
//! ```

pub mod ast;
pub mod canonical;
pub mod error;
pub mod evaluate;
pub mod explanation;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod simplify;

pub use ast::Node;
pub use canonical::canonical_key;
pub use error::Error;
pub use explanation::{Rule, Step};
pub use parser::parse;
pub use printer::render;
pub use simplify::{simplify, Simplification, Simplifier};
