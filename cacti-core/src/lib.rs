pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod interpreter;
pub mod utils;

use environment::prelude::{Environment, Object};
use lexer::prelude::{Lexer, Token};
use parser::prelude::{parse_source, Program};

/// Lexes `src` to the end. The last token is always EOF.
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::from_source(src)
        .map(|(_, token, _)| token)
        .collect()
}

/// Parses `src`. The program is only trustworthy when the diagnostics are empty.
pub fn parse(src: &str) -> (Program, Vec<String>) {
    let parsed = parse_source(src);
    let messages = parsed.messages();

    (parsed.program, messages)
}

pub fn evaluate(program: &Program, env: &mut Environment) -> Object {
    eval::evaluate(program, env)
}
