use std::path::{Path, PathBuf};

use crate::{
    environment::prelude::{Environment, Object},
    lexer::prelude::{Token, TokenKind},
    utils::prelude::Error
};

use super::{check_extension, interpret_file, load_from_stream, load_source, run, tokenize_file};

fn write_source(name: &str, src: &str) -> std::io::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("cacti-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(name);
    std::fs::write(&path, src)?;

    Ok(path)
}

#[test]
fn test_extension_check() {
    assert!(check_extension(Path::new("main.cacti")).is_ok());
    assert!(check_extension(Path::new("dir/nested.cacti")).is_ok());

    for path in ["main.txt", "main", "main.cacti.bak"] {
        assert_eq!(
            check_extension(Path::new(path)),
            Err(Error::Extension { path: PathBuf::from(path) })
        );
    }
}

#[test]
fn test_interpret_file() -> std::io::Result<()> {
    let path = write_source("closure.cacti", r#"
        let newAdder = fn(x) { fn(y) { x + y }; };
        let addTwo = newAdder(2);
        addTwo(2);
    "#)?;

    let mut env = Environment::new();

    assert_eq!(interpret_file(path, &mut env), Ok(Object::Integer { value: 4 }));

    Ok(())
}

#[test]
fn test_stream_and_memory_loading_agree() -> std::io::Result<()> {
    let src = "let greeting = \"héllo\"; greeting + \" wörld\"";
    let path = write_source("unicode.cacti", src)?;

    let streamed = load_from_stream(path.clone()).map_err(|err| std::io::Error::other(err.to_string()))?;
    let in_memory = load_source(path, src.to_string()).map_err(|err| std::io::Error::other(err.to_string()))?;

    assert_eq!(streamed, in_memory);
    assert_eq!(streamed.src, src);

    let mut env = Environment::new();
    assert_eq!(
        run(&streamed, &mut env),
        Ok(Object::String { value: "héllo wörld".into() })
    );

    Ok(())
}

#[test]
fn test_parse_errors_stop_before_evaluation() -> std::io::Result<()> {
    let path = write_source("broken.cacti", "let = 1; explode();")?;

    match interpret_file(path.clone(), &mut Environment::new()) {
        Err(Error::Parse { path: error_path, errors, .. }) => {
            assert_eq!(error_path, path);
            assert_eq!(errors[0].to_string(), "expected next token to be IDENT, got = instead");
        },
        other => panic!("expected parse error, got {other:?}")
    }

    Ok(())
}

#[test]
fn test_runtime_error_is_reported() {
    let module = match load_source(PathBuf::from("inline.cacti"), "5 + true;".to_string()) {
        Ok(module) => module,
        Err(err) => panic!("unexpected error: {err:?}")
    };

    match run(&module, &mut Environment::new()) {
        Err(Error::Runtime { message, .. }) => assert_eq!(message, "type mismatch: INTEGER + BOOLEAN"),
        other => panic!("expected runtime error, got {other:?}")
    }
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("cacti-missing-file-for-tests.cacti");

    assert_eq!(
        interpret_file(path, &mut Environment::new()),
        Err(Error::StdIo { err: std::io::ErrorKind::NotFound })
    );
}

#[test]
fn test_tokenize_file() -> std::io::Result<()> {
    let path = write_source("tokens.cacti", "let a = 1;")?;

    let tokens = tokenize_file(&path).map_err(|err| std::io::Error::other(err.to_string()))?;

    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[0], Token::new(TokenKind::Let, "let"));
    assert_eq!(tokens.last(), Some(&Token::eof()));

    assert_eq!(
        tokenize_file(Path::new("tokens.txt")),
        Err(Error::Extension { path: PathBuf::from("tokens.txt") })
    );

    Ok(())
}
