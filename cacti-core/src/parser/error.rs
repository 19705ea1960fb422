use thiserror::Error;

use crate::{lexer::prelude::TokenKind, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken {
        expected: TokenKind,
        got: TokenKind,
    },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn {
        kind: TokenKind,
    },
    #[error("could not parse {literal} as integer")]
    InvalidInteger {
        literal: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan,
    /// Delimiter left unclosed when a closing token was expected.
    pub opened: Option<SrcSpan>,
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { expected, got } => {
                let found = match got {
                    TokenKind::Eof => "the end of input".to_string(),
                    TokenKind::Ident => "an Identifier".to_string(),
                    TokenKind::Int => "an Integer".to_string(),
                    TokenKind::String => "a String".to_string(),
                    TokenKind::Illegal => "an illegal character".to_string(),
                    _ => match got.keyword() {
                        Some(keyword) => format!("the keyword `{keyword}`"),
                        None => format!("`{got}`")
                    }
                };

                ("Not expected this", vec![format!("Found {found}, expected `{expected}`")])
            },
            ParseErrorType::NoPrefixParseFn { kind } => {
                let hint = match kind {
                    TokenKind::Illegal => "This character is not part of the language".to_string(),
                    _ => format!("`{kind}` cannot start an expression")
                };

                ("Expected an expression", vec![hint])
            },
            ParseErrorType::InvalidInteger { .. } => {
                ("Integer literal is out of range", vec![format!("Integers must fit in {} bits", i64::BITS)])
            }
        }
    }
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span, opened: None })
}
