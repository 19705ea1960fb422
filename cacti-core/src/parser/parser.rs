use std::collections::HashMap;

use crate::{lexer::prelude::{Lexer, Spanned, Token, TokenKind}, utils::prelude::SrcSpan};
use super::error::{parse_error, ParseError, ParseErrorType};
use super::ast::{
    BooleanLiteral, CallExpression, Expression, FunctionLiteral, Identifier,
    IfExpression, InfixExpression, IntegerLiteral, Parsed, PrefixExpression, Program, StringLiteral
};

/// Node parsed starting at the parser's current token. On success the
/// current token is the last token of the node.
pub trait Parse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError>;
}

/// Node parsed with an already built left operand, the current token being
/// the operator.
pub trait InfixParse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>, left: Expression) -> Result<Self, ParseError>;
}

pub type PrefixParseFn<T> = fn(&mut Parser<T>) -> Result<Expression, ParseError>;
pub type InfixParseFn<T> = fn(&mut Parser<T>, Expression) -> Result<Expression, ParseError>;

pub struct Parser<T: Iterator<Item = Spanned>> {
    pub current_token: Spanned,
    pub next_token: Spanned,
    pub errors: Vec<ParseError>,

    tokens: T,
    prefix_fns: HashMap<TokenKind, PrefixParseFn<T>>,
    infix_fns: HashMap<TokenKind, InfixParseFn<T>>,
}

impl<T: Iterator<Item = Spanned>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: (0, Token::eof(), 0),
            next_token: (0, Token::eof(), 0),
            errors: vec![],

            tokens: input,
            prefix_fns: HashMap::new(),
            infix_fns: HashMap::new(),
        };

        parser.register_prefix(TokenKind::Ident, |parser| {
            Ok(Expression::Identifier(Identifier::parse(parser)?))
        });
        parser.register_prefix(TokenKind::Int, |parser| {
            Ok(Expression::Integer(IntegerLiteral::parse(parser)?))
        });
        parser.register_prefix(TokenKind::String, |parser| {
            Ok(Expression::String(StringLiteral::parse(parser)?))
        });
        for kind in [TokenKind::True, TokenKind::False] {
            parser.register_prefix(kind, |parser| {
                Ok(Expression::Boolean(BooleanLiteral::parse(parser)?))
            });
        }
        for kind in [TokenKind::Bang, TokenKind::Minus] {
            parser.register_prefix(kind, |parser| {
                Ok(Expression::Prefix(PrefixExpression::parse(parser)?))
            });
        }
        parser.register_prefix(TokenKind::LParen, Parser::parse_grouped_expression);
        parser.register_prefix(TokenKind::If, |parser| {
            Ok(Expression::If(IfExpression::parse(parser)?))
        });
        parser.register_prefix(TokenKind::Function, |parser| {
            Ok(Expression::Function(FunctionLiteral::parse(parser)?))
        });

        for kind in [
            TokenKind::Plus, TokenKind::Minus, TokenKind::Asterisk, TokenKind::Slash,
            TokenKind::Equal, TokenKind::NotEqual, TokenKind::LessThan, TokenKind::GreaterThan,
        ] {
            parser.register_infix(kind, |parser, left| {
                Ok(Expression::Infix(InfixExpression::parse(parser, left)?))
            });
        }
        parser.register_infix(TokenKind::LParen, |parser, left| {
            Ok(Expression::Call(CallExpression::parse(parser, left)?))
        });

        parser.step();
        parser.step();

        parser
    }

    fn register_prefix(&mut self, kind: TokenKind, handler: PrefixParseFn<T>) {
        self.prefix_fns.insert(kind, handler);
    }

    fn register_infix(&mut self, kind: TokenKind, handler: InfixParseFn<T>) {
        self.infix_fns.insert(kind, handler);
    }

    pub fn step(&mut self) {
        let _ = self.advance();
    }

    /// Moves the window one token forward and returns the token that was
    /// current before the move.
    pub fn advance(&mut self) -> Spanned {
        let end = self.next_token.2;
        let next = self.tokens.next()
            .unwrap_or_else(|| (end, Token::eof(), end));

        let previous = std::mem::replace(&mut self.next_token, next);

        std::mem::replace(&mut self.current_token, previous)
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.1.is(kind)
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.next_token.1.is(kind)
    }

    pub fn current_span(&self) -> SrcSpan {
        SrcSpan::from(self.current_token.0, self.current_token.2)
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(&self.current_token.1.kind)
    }

    pub fn peek_precedence(&self) -> Precedence {
        Precedence::from(&self.next_token.1.kind)
    }

    /// Steps onto the next token when it has the expected kind.
    pub fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.step();
            return Ok(());
        }

        let (start, token, end) = &self.next_token;

        parse_error(
            ParseErrorType::UnexpectedToken {
                expected: kind,
                got: token.kind,
            },
            SrcSpan::from(*start, *end)
        )
    }

    /// `expect_peek` for the delimiter closing the one at `opened`.
    pub fn expect_closing(&mut self, kind: TokenKind, opened: SrcSpan) -> Result<(), ParseError> {
        self.expect_peek(kind)
            .map_err(|err| ParseError { opened: Some(opened), ..err })
    }

    /// Records a failed statement. A `;` right after the failure point still
    /// belongs to the dropped statement.
    pub fn recover(&mut self, err: ParseError) {
        log::debug!("recovering from parse error at {}: {}", err.span, err);

        self.errors.push(err);

        if self.peek_is(TokenKind::Semicolon) {
            self.step();
        }
    }

    pub fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
        let prefix = match self.prefix_fns.get(&self.current_token.1.kind) {
            Some(prefix) => *prefix,
            None => return parse_error(
                ParseErrorType::NoPrefixParseFn { kind: self.current_token.1.kind },
                self.current_span()
            )
        };

        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let infix = match self.infix_fns.get(&self.next_token.1.kind) {
                Some(infix) => *infix,
                None => return Ok(left)
            };

            self.step();

            left = infix(self, left)?;
        }

        Ok(left)
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression, ParseError> {
        let opened = self.current_span();
        self.step();

        let expression = self.parse_expression(Precedence::Lowest)?;

        self.expect_closing(TokenKind::RParen, opened)?;

        Ok(expression)
    }

    /// Comma separated expressions up to the closing `end` token.
    pub fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expression>, ParseError> {
        let opened = self.current_span();
        let mut list = vec![];

        if self.peek_is(end) {
            self.step();
            return Ok(list);
        }

        self.step();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.step();
            self.step();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_closing(end, opened)?;

        Ok(list)
    }

    pub fn parse_function_parameters(&mut self) -> Result<Vec<Identifier>, ParseError> {
        let opened = self.current_span();
        let mut identifiers = vec![];

        if self.peek_is(TokenKind::RParen) {
            self.step();
            return Ok(identifiers);
        }

        self.expect_peek(TokenKind::Ident)?;
        identifiers.push(Identifier::parse(self)?);

        while self.peek_is(TokenKind::Comma) {
            self.step();
            self.expect_peek(TokenKind::Ident)?;
            identifiers.push(Identifier::parse(self)?);
        }

        self.expect_closing(TokenKind::RParen, opened)?;

        Ok(identifiers)
    }

    /// Parses the whole token stream. Never fails: malformed statements are
    /// dropped and reported through the returned error list.
    pub fn parse(mut self) -> Parsed {
        let program = match Program::parse(&mut self) {
            Ok(program) => program,
            Err(err) => {
                self.errors.push(err);
                Program::default()
            }
        };

        log::debug!(
            "parsed {} statements with {} errors",
            program.statements.len(),
            self.errors.len()
        );

        Parsed {
            program,
            errors: self.errors
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call
}

impl From<&TokenKind> for Precedence {
    fn from(value: &TokenKind) -> Self {
        match value {
            TokenKind::Equal | TokenKind::NotEqual => Self::Equals,
            TokenKind::LessThan | TokenKind::GreaterThan => Self::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Slash | TokenKind::Asterisk => Self::Product,
            TokenKind::LParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_source(src: &str) -> Parsed {
    Parser::new(Lexer::from_source(src)).parse()
}

pub fn parse_stream(stream: impl Iterator<Item = char>) -> Parsed {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );

    Parser::new(lexer).parse()
}
