use crate::{
    ast::Node,
    error::{Error, ParseError},
    lexer::{tokenize, Token},
};

/// Parses `input` into an expression tree.
///
/// Precedence from loosest to tightest: `|`, `^`, `&`, `~`. Chains of `&` and
/// `|` become a single variadic node.
pub fn parse(input: &str) -> Result<Node, Error> {
    let tokens = tokenize(input)?;
    Ok(parse_tokens(&tokens)?)
}

pub fn parse_tokens(tokens: &[Token]) -> Result<Node, ParseError> {
    let mut stream = TokenStream {
        tokens,
        position: 0,
        depth: 0,
    };

    let node = stream.expression()?;

    match stream.peek() {
        Token::End => Ok(node),
        found => Err(ParseError::TrailingInput {
            found: found.clone(),
            position: stream.position,
        }),
    }
}

/// Deepest nesting of parentheses, negations and chained `^` accepted by the parser.
///
/// Parsed trees are never deeper than this, which keeps the recursive passes over
/// them within the stack.
pub const MAX_DEPTH: usize = 256;

static END: Token = Token::End;

struct TokenStream<'a> {
    tokens: &'a [Token],
    position: usize,
    depth: usize,
}

impl TokenStream<'_> {
    fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&END)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.advance();
            true
        } else {
            false
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                position: self.position,
            });
        }

        self.depth += 1;
        Ok(())
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.peek().clone(),
            expected,
            position: self.position,
        }
    }

    fn expression(&mut self) -> Result<Node, ParseError> {
        self.disjunction()
    }

    fn disjunction(&mut self) -> Result<Node, ParseError> {
        let mut node = self.exclusive_disjunction()?;

        while self.eat(&Token::Or) {
            let right = self.exclusive_disjunction()?;
            node = Node::Or(flatten(node, right, Node::into_or));
        }

        Ok(node)
    }

    fn exclusive_disjunction(&mut self) -> Result<Node, ParseError> {
        let mut node = self.conjunction()?;
        let mut chained = 0;

        // Every `^` adds a level to the left-nested tree.
        while *self.peek() == Token::Xor {
            self.descend()?;
            self.advance();
            chained += 1;

            let right = self.conjunction()?;
            node = Node::xor(node, right);
        }

        self.depth -= chained;

        Ok(node)
    }

    fn conjunction(&mut self) -> Result<Node, ParseError> {
        let mut node = self.unary()?;

        while self.eat(&Token::And) {
            let right = self.unary()?;
            node = Node::And(flatten(node, right, Node::into_and));
        }

        Ok(node)
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if *self.peek() == Token::Not {
            self.descend()?;
            self.advance();

            let node = Node::not(self.unary()?);
            self.depth -= 1;

            return Ok(node);
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        match self.peek() {
            Token::Var(name) => {
                let node = Node::var(name.clone());
                self.advance();
                Ok(node)
            }
            Token::Const(value) => {
                let node = Node::Const(*value);
                self.advance();
                Ok(node)
            }
            Token::LParen => {
                self.descend()?;
                self.advance();
                let node = self.expression()?;

                if !self.eat(&Token::RParen) {
                    return Err(self.unexpected("closing parenthesis"));
                }

                self.depth -= 1;
                Ok(node)
            }
            _ => Err(self.unexpected("operand")),
        }
    }
}

/// Joins two operands of the same variadic connective, splicing in the
/// children of operands that already are that connective.
fn flatten(
    left: Node,
    right: Node,
    children_of: impl Fn(Node) -> Result<Vec<Node>, Node>,
) -> Vec<Node> {
    [left, right]
        .into_iter()
        .flat_map(|operand| children_of(operand).unwrap_or_else(|operand| vec![operand]))
        .collect()
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn var(name: &str) -> Node {
        Node::var(name)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("A | B ^ C & ~D").unwrap(),
            Node::or([
                var("A"),
                Node::xor(var("B"), Node::and([var("C"), Node::not(var("D"))])),
            ])
        );
    }

    #[test]
    fn test_variadic_chains() {
        assert_eq!(
            parse("A & B & C | D | E").unwrap(),
            Node::or([Node::and([var("A"), var("B"), var("C")]), var("D"), var("E")])
        );
    }

    #[test]
    fn test_parenthesized_operands_are_flattened() {
        assert_eq!(
            parse("(A & B) & (C & D)").unwrap(),
            Node::and([var("A"), var("B"), var("C"), var("D")])
        );
        assert_eq!(
            parse("A | (B | C)").unwrap(),
            Node::or([var("A"), var("B"), var("C")])
        );
    }

    #[test]
    fn test_parentheses_reset_precedence() {
        assert_eq!(
            parse("(A | B) & C").unwrap(),
            Node::and([Node::or([var("A"), var("B")]), var("C")])
        );
    }

    #[test]
    fn test_xor_is_left_associative() {
        assert_eq!(
            parse("A ^ B ^ C").unwrap(),
            Node::xor(Node::xor(var("A"), var("B")), var("C"))
        );
    }

    #[test]
    fn test_negation_chain() {
        assert_eq!(
            parse("~!~A & B").unwrap(),
            Node::and([Node::not(Node::not(Node::not(var("A")))), var("B")])
        );
    }

    #[test]
    fn test_constants() {
        assert_eq!(
            parse("1 ^ 0").unwrap(),
            Node::xor(Node::Const(true), Node::Const(false))
        );
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            parse("A &"),
            Err(Error::Parse(ParseError::UnexpectedToken {
                found: Token::End,
                expected: "operand",
                position: 2,
            }))
        );
    }

    #[test]
    fn test_missing_closing_parenthesis() {
        assert_eq!(
            parse("(A | B"),
            Err(Error::Parse(ParseError::UnexpectedToken {
                found: Token::End,
                expected: "closing parenthesis",
                position: 4,
            }))
        );
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(
            parse("A B"),
            Err(Error::Parse(ParseError::TrailingInput {
                found: Token::Var("B".to_owned()),
                position: 1,
            }))
        );
        assert_eq!(
            parse("(A))"),
            Err(Error::Parse(ParseError::TrailingInput {
                found: Token::RParen,
                position: 3,
            }))
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse("   "),
            Err(Error::Parse(ParseError::UnexpectedToken {
                found: Token::End,
                ..
            }))
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}A{}", "(".repeat(depth), ")".repeat(depth));

        assert!(parse(&nested(MAX_DEPTH)).is_ok());
        assert_eq!(
            parse(&nested(200_000)),
            Err(Error::Parse(ParseError::TooDeep {
                position: MAX_DEPTH
            }))
        );
        assert_eq!(
            parse(&format!("{}A", "~".repeat(200_000))),
            Err(Error::Parse(ParseError::TooDeep {
                position: MAX_DEPTH
            }))
        );
    }

    #[test]
    fn test_xor_chain_limit() {
        let chain = |length: usize| vec!["A"; length + 1].join(" ^ ");

        assert!(parse(&chain(MAX_DEPTH)).is_ok());
        assert_eq!(
            parse(&chain(10_000)),
            Err(Error::Parse(ParseError::TooDeep {
                position: 2 * MAX_DEPTH + 1
            }))
        );
    }

    #[test]
    fn test_sibling_groups_do_not_accumulate_depth() {
        let group = format!("{}A{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        let input = vec![group; 4].join(" & ");

        assert_eq!(parse(&input).unwrap(), Node::and(vec![Node::var("A"); 4]));
    }

    #[test]
    fn test_lex_errors_are_propagated() {
        assert!(matches!(parse("A $ B"), Err(Error::Lex(_))));
    }
}
