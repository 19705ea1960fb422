use crate::{
    environment::prelude::{Environment, Object, FALSE, NULL, TRUE},
    parser::prelude::parse_source
};

use super::evaluate;

fn eval_input(input: &str) -> Object {
    let mut env = Environment::new();

    eval_in(input, &mut env)
}

fn eval_in(input: &str, env: &mut Environment) -> Object {
    let parsed = parse_source(input);

    assert!(parsed.is_ok(), "parser errors for {input:?}: {:?}", parsed.messages());

    evaluate(&parsed.program, env)
}

fn integer(value: i64) -> Object {
    Object::Integer { value }
}

fn check(tests: &[(&str, Object)]) {
    for (input, expected) in tests {
        assert_eq!(&eval_input(input), expected, "input {input:?}");
    }
}

#[test]
fn test_integer_expressions() {
    check(&[
        ("5", integer(5)),
        ("10", integer(10)),
        ("-5", integer(-5)),
        ("-10", integer(-10)),
        ("5 + 5 + 5 + 5 - 10;", integer(10)),
        ("2 * 2 * 2 * 2 * 2", integer(32)),
        ("-50 + 100 + -50", integer(0)),
        ("5 * 2 + 10", integer(20)),
        ("5 + 2 * 10", integer(25)),
        ("20 + 2 * -10", integer(0)),
        ("50 / 2 * 2 + 10", integer(60)),
        ("2 * (5 + 10)", integer(30)),
        ("3 * 3 * 3 + 10", integer(37)),
        ("3 * (3 * 3) + 10", integer(37)),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10;", integer(50)),
    ]);
}

#[test]
fn test_integer_division_and_overflow() {
    check(&[
        ("7 / 2", integer(3)),
        ("-7 / 2", integer(-3)),
        ("7 / -2", integer(-3)),
        ("9223372036854775807 + 1", integer(i64::MIN)),
        ("-9223372036854775807 - 2", integer(i64::MAX)),
    ]);
}

#[test]
fn test_boolean_expressions() {
    check(&[
        ("true", TRUE),
        ("false", FALSE),
        ("1 < 2", TRUE),
        ("1 > 2", FALSE),
        ("1 < 1", FALSE),
        ("1 == 1", TRUE),
        ("1 != 1", FALSE),
        ("1 != 2", TRUE),
        ("true == true", TRUE),
        ("false == false", TRUE),
        ("true == false", FALSE),
        ("true != false", TRUE),
        ("(1 < 2) == true", TRUE),
        ("(1 > 2) == true", FALSE),
    ]);
}

#[test]
fn test_identity_equality() {
    check(&[
        ("let n = if (false) { 1 }; n == n", TRUE),
        ("true == if (false) { 1 }", FALSE),
        ("let f = fn() { 1 }; f == f", FALSE),
        ("let f = fn() { 1 }; f != f", TRUE),
    ]);
}

#[test]
fn test_bang_operator() {
    check(&[
        ("!true", FALSE),
        ("!false", TRUE),
        ("!5", FALSE),
        ("!0", FALSE),
        ("!!true", TRUE),
        ("!!5", TRUE),
        (r#"!"""#, FALSE),
        ("!if (false) { 1 }", TRUE),
    ]);
}

#[test]
fn test_if_else_expressions() {
    check(&[
        ("if (true) { 10 }", integer(10)),
        ("if (false) { 10 }", NULL),
        ("if (1) { 10 }", integer(10)),
        ("if (1 < 2) { 10 }", integer(10)),
        ("if (1 > 2) { 10 }", NULL),
        ("if (1 > 2) { 10 } else { 20 }", integer(20)),
        ("if (1 < 2) { 10 } else { 20 }", integer(10)),
        ("if (1 < 2) { }", NULL),
    ]);
}

#[test]
fn test_return_statements() {
    check(&[
        ("return 10;", integer(10)),
        ("return 10; 9;", integer(10)),
        ("return 2 * 5; 9;", integer(10)),
        ("9; return 2 * 5; 9;", integer(10)),
        (
            r#"
            if (10 > 1) {
                if (10 > 1) {
                    return 10;
                }

                return 1;
            }
            "#,
            integer(10),
        ),
        (
            r#"
            if (true) {
                if (true) {
                    if (true) {
                        return 3;
                        99;
                    }
                    98;
                }
                97;
            }
            96;
            "#,
            integer(3),
        ),
        (
            r#"
            let f = fn(x) {
                if (x > 0) {
                    if (x > 5) {
                        return "big";
                    }
                    return "small";
                }
                "none"
            };
            f(10) + " " + f(1) + " " + f(0)
            "#,
            Object::String { value: "big small none".into() },
        ),
    ]);
}

#[test]
fn test_error_handling() {
    let tests = [
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("1 == true", "type mismatch: INTEGER == BOOLEAN"),
        (r#""a" + 1"#, "type mismatch: STRING + INTEGER"),
        ("-true", "unknown operator: -BOOLEAN"),
        (r#"-"a""#, "unknown operator: -STRING"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            r#"
            if (10 > 1) {
                if (10 > 1) {
                    return true + false;
                }

                return 1;
            }
            "#,
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "identifier not found: foobar"),
        (r#""Hello" - "World";"#, "unknown operator: STRING - STRING"),
        (r#""a" == "a""#, "unknown operator: STRING == STRING"),
        ("10 / 0", "division by zero"),
        ("5(1)", "not a function: INTEGER"),
        (r#""f"()"#, "not a function: STRING"),
        ("fn(x) { x }(1, 2)", "wrong number of arguments: want=1, got=2"),
        ("fn(x, y) { x }()", "wrong number of arguments: want=2, got=0"),
        ("let f = fn(x, y) { x }; f(foobar, 1 / 0)", "identifier not found: foobar"),
        ("let a = -true; a", "unknown operator: -BOOLEAN"),
        ("if (missing) { 1 }", "identifier not found: missing"),
    ];

    for (input, message) in tests {
        match eval_input(input) {
            Object::Error { message: got } => assert_eq!(got, message, "input {input:?}"),
            other => panic!("no error object returned for {input:?}, got {other:?}")
        }
    }
}

#[test]
fn test_let_statements() {
    check(&[
        ("let a = 5; a;", integer(5)),
        ("let a = 5 * 5; a;", integer(25)),
        ("let a = 5; let b = a; b;", integer(5)),
        ("let a = 5; let b = a; let c = a + b + 5; c;", integer(15)),
        ("let a = 1;", NULL),
        ("", NULL),
    ]);
}

#[test]
fn test_block_statement_uses_current_scope() {
    check(&[
        ("let a = 1; { let a = 2; } a", integer(2)),
        ("{ 1; 2 }", integer(2)),
    ]);
}

#[test]
fn test_function_object() {
    match eval_input("fn(x) { x + 2; };") {
        Object::Function(function) => {
            assert_eq!(function.parameters.len(), 1);
            assert_eq!(function.parameters[0].value, "x");
            assert_eq!(function.body.to_string(), "{ (x + 2); }");
        },
        other => panic!("object is not a function, got {other:?}")
    }
}

#[test]
fn test_function_application() {
    check(&[
        ("let identity = fn(x) { x; }; identity(5);", integer(5)),
        ("let identity = fn(x) { return x; }; identity(5);", integer(5)),
        ("let double = fn(x) { x * 2; }; double(5);", integer(10)),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", integer(10)),
        ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", integer(20)),
        ("fn(x) { x; }(5)", integer(5)),
        ("let f = fn() { }; f()", NULL),
        ("let x = 1; let f = fn(x) { x * 10 }; f(2) + x", integer(21)),
    ]);
}

#[test]
fn test_closures() {
    check(&[
        (
            "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(2);",
            integer(4),
        ),
        ("let x = 1; let f = fn() { x }; let x = 2; f()", integer(2)),
        (
            r#"
            let compose = fn(f, g) { fn(x) { g(f(x)) } };
            let inc = fn(x) { x + 1 };
            let double = fn(x) { x * 2 };
            compose(inc, double)(5)
            "#,
            integer(12),
        ),
    ]);
}

#[test]
fn test_recursion() {
    check(&[
        (
            r#"
            let fib = fn(n) {
                if (n < 2) { return n; }
                fib(n - 1) + fib(n - 2)
            };
            fib(15)
            "#,
            integer(610),
        ),
        (
            r#"
            let countdown = fn(n) { if (n == 0) { "done" } else { countdown(n - 1) } };
            countdown(50)
            "#,
            Object::String { value: "done".into() },
        ),
    ]);
}

#[test]
fn test_string_expressions() {
    check(&[
        (r#""Hello World!""#, Object::String { value: "Hello World!".into() }),
        (r#""Hello" + " " + "World!""#, Object::String { value: "Hello World!".into() }),
        (r#"let s = "ab"; s + s"#, Object::String { value: "abab".into() }),
    ]);
}

#[test]
fn test_scopes_are_released_after_evaluation() {
    let mut env = Environment::new();

    eval_in("let f = fn(x) { x }; f(1); f(2); f(3);", &mut env);
    assert_eq!(env.len(), 1);

    eval_in("let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2);", &mut env);
    assert_eq!(env.len(), 2);

    assert_eq!(eval_in("addTwo(40)", &mut env), integer(42));
    assert_eq!(env.len(), 2);

    match eval_in("newAdder(5)", &mut env) {
        Object::Function(_) => assert_eq!(env.len(), 3),
        other => panic!("expected a closure, got {other:?}")
    }

    eval_in("let addTwo = 0;", &mut env);
    assert_eq!(env.len(), 1);
}

#[test]
fn test_session_keeps_bindings() {
    let mut env = Environment::new();

    eval_in("let a = 20;", &mut env);
    eval_in("let add = fn(x) { x + a };", &mut env);

    assert_eq!(eval_in("add(22)", &mut env), integer(42));
}

#[test]
fn test_return_unwinds_through_expressions() {
    check(&[
        ("fn() { let x = if (true) { return 1; }; 2 }()", integer(1)),
        ("let x = if (true) { return 1; }; x + 1", integer(1)),
        ("let f = fn(x) { x }; fn() { f(if (true) { return 7; }); 9 }()", integer(7)),
        ("fn() { 1 + if (true) { return 5; }; 10 }()", integer(5)),
        ("fn() { -if (true) { return 3; }; 10 }()", integer(3)),
        ("fn() { if (if (true) { return 4; }) { 1 }; 10 }()", integer(4)),
        ("fn() { return if (true) { return 6; }; }()", integer(6)),
    ]);
}
