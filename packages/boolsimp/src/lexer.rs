use derive_more::Display;
use winnow::{
    ascii::multispace0,
    combinator::alt,
    token::{one_of, take_while},
    PResult, Parser,
};

use crate::error::LexError;

type Input<'a> = &'a str;

pub const AND_SYMBOLS: [char; 4] = ['&', '*', '·', '∧'];
pub const OR_SYMBOLS: [char; 5] = ['|', '+', 'v', 'V', '∨'];
pub const XOR_SYMBOLS: [char; 2] = ['^', '⊕'];
pub const NOT_SYMBOLS: [char; 3] = ['~', '!', '¬'];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum Token {
    #[display("'('")]
    LParen,
    #[display("')'")]
    RParen,
    #[display("'&'")]
    And,
    #[display("'|'")]
    Or,
    #[display("'^'")]
    Xor,
    #[display("'~'")]
    Not,
    #[display("constant '{}'", u8::from(*_0))]
    Const(bool),
    #[display("variable '{_0}'")]
    Var(String),
    #[display("end of input")]
    End,
}

/// Splits `input` into tokens, always terminated by [`Token::End`].
///
/// A `v`/`V` that starts a token is the disjunction operator, so `vA` lexes as
/// `| A` while `Av` is a single identifier.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut rest = input;
    let mut tokens = Vec::new();

    loop {
        let _ = whitespace(&mut rest);

        let Some(character) = rest.chars().next() else {
            break;
        };
        let position = input.len() - rest.len();

        match token(&mut rest) {
            Ok(token) => tokens.push(token),
            Err(_) => {
                return Err(LexError::UnexpectedCharacter {
                    character,
                    position,
                })
            }
        }
    }

    tokens.push(Token::End);

    Ok(tokens)
}

fn whitespace(input: &mut Input) -> PResult<()> {
    multispace0.void().parse_next(input)
}

fn token(input: &mut Input) -> PResult<Token> {
    alt((
        '('.value(Token::LParen),
        ')'.value(Token::RParen),
        one_of(AND_SYMBOLS).value(Token::And),
        one_of(OR_SYMBOLS).value(Token::Or),
        one_of(XOR_SYMBOLS).value(Token::Xor),
        one_of(NOT_SYMBOLS).value(Token::Not),
        one_of(['0', '1']).map(|digit| Token::Const(digit == '1')),
        identifier.map(Token::Var),
    ))
    .parse_next(input)
}

fn identifier(input: &mut Input) -> PResult<String> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .map(|(first, rest): (char, &str)| format!("{first}{rest}"))
        .parse_next(input)
}
