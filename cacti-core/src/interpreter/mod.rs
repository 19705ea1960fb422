use std::path::{Path, PathBuf};

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, Object},
    eval::evaluate,
    lexer::prelude::{Lexer, Token},
    parser::prelude::{parse_source, parse_stream, Parsed, Program},
    utils::prelude::Error
};

pub const EXTENSION: &str = "cacti";

/// Parsed source file, kept together with its text for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub path: PathBuf,
    pub src: String,
    pub program: Program,
}

pub fn check_extension(path: &Path) -> Result<(), Error> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(EXTENSION) => Ok(()),
        _ => Err(Error::Extension { path: path.to_path_buf() })
    }
}

pub fn read_source(path: &Path) -> Result<String, Error> {
    check_extension(path)?;

    std::fs::read_to_string(path)
        .map_err(|err| Error::StdIo { err: err.kind() })
}

pub fn tokenize_file(path: &Path) -> Result<Vec<Token>, Error> {
    let src = read_source(path)?;

    Ok(Lexer::from_source(&src)
        .map(|(_, token, _)| token)
        .collect())
}

/// Parses an in-memory source. Any parse diagnostic fails the whole module.
pub fn load_source(path: PathBuf, src: String) -> Result<Module, Error> {
    let parsed = parse_source(&src);

    into_module(path, src, parsed)
}

/// Parses a file while it is being read.
pub fn load_from_stream(path: PathBuf) -> Result<Module, Error> {
    check_extension(&path)?;

    let file = std::fs::File::open(&path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut io_error = None;
    let mut reader = std::io::BufReader::new(file);

    let stream = reader.chars()
        .map_while(|c| match c {
            Ok(c) => {
                src.push(c);
                Some(c)
            },
            Err(err) => {
                io_error = Some(err.kind());
                None
            }
        });

    let parsed = parse_stream(stream);

    if let Some(err) = io_error {
        return Err(Error::StdIo { err });
    }

    into_module(path, src, parsed)
}

fn into_module(path: PathBuf, src: String, parsed: Parsed) -> Result<Module, Error> {
    if !parsed.is_ok() {
        log::debug!("{} has {} parse errors", path.display(), parsed.errors.len());

        return Err(Error::Parse { path, src, errors: parsed.errors });
    }

    Ok(Module { path, src, program: parsed.program })
}

/// Evaluates a module. An error value at the top level becomes `Error::Runtime`.
pub fn run(module: &Module, env: &mut Environment) -> Result<Object, Error> {
    match evaluate(&module.program, env) {
        Object::Error { message } => Err(Error::Runtime {
            path: module.path.clone(),
            src: module.src.clone(),
            message
        }),
        value => Ok(value)
    }
}

pub fn interpret_file(path: PathBuf, env: &mut Environment) -> Result<Object, Error> {
    let module = load_from_stream(path)?;

    run(&module, env)
}

#[cfg(test)]
mod tests;
