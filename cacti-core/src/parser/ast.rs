use std::fmt::Display;

use crate::{
    lexer::prelude::{Spanned, Token, TokenKind},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

#[derive(Debug)]
pub struct Parsed {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter()
            .map(|err| err.to_string())
            .collect()
    }
}

// program -> { <statement> }
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Program {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let start = parser.current_token.0;
        let mut statements = vec![];

        while !parser.current_is(TokenKind::Eof) {
            match Statement::parse(parser) {
                Ok(statement) => statements.push(statement),
                Err(err) => parser.recover(err)
            }

            parser.step();
        }

        Ok(Self {
            statements,
            location: SrcSpan::from(start, parser.current_token.2)
        })
    }
}

impl Program {
    pub fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(statement) => statement.token_literal(),
            None => ""
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, statement) in self.statements.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }

            match statement {
                Statement::Expression(statement) => write!(f, "{statement};")?,
                statement => write!(f, "{statement}")?
            }
        }

        Ok(())
    }
}

// statement -> <let> | <return> | <block> | <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Statement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let res = match parser.current_token.1.kind {
            TokenKind::Let => Self::Let(LetStatement::parse(parser)?),
            TokenKind::Return => Self::Return(ReturnStatement::parse(parser)?),
            TokenKind::LBrace => Self::Block(BlockStatement::parse(parser)?),
            _ => Self::Expression(ExpressionStatement::parse(parser)?),
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Let(statement) => write!(f, "{statement}"),
            Self::Return(statement) => write!(f, "{statement}"),
            Self::Expression(statement) => write!(f, "{statement}"),
            Self::Block(block) => write!(f, "{block}")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Let(statement) => statement.location,
            Self::Return(statement) => statement.location,
            Self::Expression(statement) => statement.location,
            Self::Block(block) => block.location
        }
    }

    pub fn token_literal(&self) -> &str {
        match self {
            Self::Let(statement) => &statement.token.literal,
            Self::Return(statement) => &statement.token.literal,
            Self::Expression(statement) => &statement.token.literal,
            Self::Block(block) => &block.token.literal
        }
    }
}

// let -> let <identifier> = <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for LetStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, _) = parser.current_token.clone();

        parser.expect_peek(TokenKind::Ident)?;
        let name = Identifier::parse(parser)?;

        parser.expect_peek(TokenKind::Assign)?;
        parser.step();

        let value = Expression::parse(parser)?;

        if parser.peek_is(TokenKind::Semicolon) {
            parser.step();
        }

        Ok(Self {
            token,
            name,
            value,
            location: SrcSpan::from(start, parser.current_token.2)
        })
    }
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} = {};", self.token.literal, self.name, self.value)
    }
}

// return -> return <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ReturnStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, _) = parser.advance();

        let value = Expression::parse(parser)?;

        if parser.peek_is(TokenKind::Semicolon) {
            parser.step();
        }

        Ok(Self {
            token,
            value,
            location: SrcSpan::from(start, parser.current_token.2)
        })
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {};", self.token.literal, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ExpressionStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, _) = parser.current_token.clone();

        let expression = Expression::parse(parser)?;

        if parser.peek_is(TokenKind::Semicolon) {
            parser.step();
        }

        Ok(Self {
            token,
            expression,
            location: SrcSpan::from(start, parser.current_token.2)
        })
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

// block -> { { <statement> } }
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for BlockStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, _) = parser.advance();
        let mut statements = vec![];

        while !parser.current_is(TokenKind::RBrace) && !parser.current_is(TokenKind::Eof) {
            match Statement::parse(parser) {
                Ok(statement) => statements.push(statement),
                Err(err) => parser.recover(err)
            }

            parser.step();
        }

        Ok(Self {
            token,
            statements,
            location: SrcSpan::from(start, parser.current_token.2)
        })
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ ")?;

        for statement in &self.statements {
            match statement {
                Statement::Expression(statement) => write!(f, "{statement}; ")?,
                statement => write!(f, "{statement} ")?
            }
        }

        write!(f, "}}")
    }
}

// expression -> <identifier> | <integer> | <string> | <boolean> | <prefix> | <infix>
//             | <if> | <function> | <call> | "(" <expression> ")"
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Expression {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        parser.parse_expression(Precedence::Lowest)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Integer(integer) => write!(f, "{integer}"),
            Self::String(string) => write!(f, "{string}"),
            Self::Boolean(boolean) => write!(f, "{boolean}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::If(if_) => write!(f, "{if_}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Call(call) => write!(f, "{call}")
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Integer(integer) => integer.location,
            Self::String(string) => string.location,
            Self::Boolean(boolean) => boolean.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Infix(infix) => infix.location,
            Self::If(if_) => if_.location,
            Self::Function(function) => function.location,
            Self::Call(call) => call.location
        }
    }

    pub fn token_literal(&self) -> &str {
        let token = match self {
            Self::Identifier(ident) => &ident.token,
            Self::Integer(integer) => &integer.token,
            Self::String(string) => &string.token,
            Self::Boolean(boolean) => &boolean.token,
            Self::Prefix(prefix) => &prefix.token,
            Self::Infix(infix) => &infix.token,
            Self::If(if_) => &if_.token,
            Self::Function(function) => &function.token,
            Self::Call(call) => &call.token
        };

        &token.literal
    }
}

// identifier -> (<letter> | _) { <letter> | _ }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Identifier {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, end) = parser.current_token.clone();

        Ok(Self {
            value: token.literal.clone(),
            token,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for IntegerLiteral {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, end) = parser.current_token.clone();
        let location = SrcSpan::from(start, end);

        match token.literal.parse::<i64>() {
            Ok(value) => Ok(Self { token, value, location }),
            Err(_) => parse_error(
                ParseErrorType::InvalidInteger { literal: token.literal },
                location
            )
        }
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for StringLiteral {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, end) = parser.current_token.clone();

        Ok(Self {
            value: token.literal.clone(),
            token,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for BooleanLiteral {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, end) = parser.current_token.clone();

        Ok(Self {
            value: token.is(TokenKind::True),
            token,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

// prefix -> (! | -) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: TokenKind,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for PrefixExpression {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, _) = parser.advance();

        let right = parser.parse_expression(Precedence::Prefix)?;
        let end = right.location().end;

        Ok(Self {
            operator: token.kind,
            token,
            right: Box::new(right),
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for PrefixExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: TokenKind,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for InfixExpression {
    fn parse(parser: &mut Parser<T>, left: Expression) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();
        let (_, token, _) = parser.advance();

        let right = parser.parse_expression(precedence)?;
        let location = left.location().merge(right.location());

        Ok(Self {
            operator: token.kind,
            token,
            left: Box::new(left),
            right: Box::new(right),
            location
        })
    }
}

impl Display for InfixExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

// if -> if ( <expression> ) <block> [else <block>]
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for IfExpression {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, _) = parser.current_token.clone();

        parser.expect_peek(TokenKind::LParen)?;
        let opened = parser.current_span();
        parser.step();

        let condition = Expression::parse(parser)?;

        parser.expect_closing(TokenKind::RParen, opened)?;
        parser.expect_peek(TokenKind::LBrace)?;

        let consequence = BlockStatement::parse(parser)?;

        let alternative = if parser.peek_is(TokenKind::Else) {
            parser.step();
            parser.expect_peek(TokenKind::LBrace)?;

            Some(BlockStatement::parse(parser)?)
        } else {
            None
        };

        Ok(Self {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
            location: SrcSpan::from(start, parser.current_token.2)
        })
    }
}

impl Display for IfExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;

        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }

        Ok(())
    }
}

// function -> fn ( [<identifier> {, <identifier>}] ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for FunctionLiteral {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, _) = parser.current_token.clone();

        parser.expect_peek(TokenKind::LParen)?;
        let parameters = parser.parse_function_parameters()?;

        parser.expect_peek(TokenKind::LBrace)?;
        let body = BlockStatement::parse(parser)?;

        Ok(Self {
            token,
            parameters,
            body,
            location: SrcSpan::from(start, parser.current_token.2)
        })
    }
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({}) {}", self.token.literal, parameters.join(", "), self.body)
    }
}

// call -> <expression> ( [<expression> {, <expression>}] )
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for CallExpression {
    fn parse(parser: &mut Parser<T>, function: Expression) -> Result<Self, ParseError> {
        let token = parser.current_token.1.clone();
        let arguments = parser.parse_expression_list(TokenKind::RParen)?;

        let location = SrcSpan::from(function.location().start, parser.current_token.2);

        Ok(Self {
            token,
            function: Box::new(function),
            arguments,
            location
        })
    }
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(|argument| argument.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({})", self.function, arguments.join(", "))
    }
}
