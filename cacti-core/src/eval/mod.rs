#[cfg(test)]
mod tests;

use crate::{
    environment::prelude::{Environment, Function, Object, ScopeId, NULL},
    lexer::prelude::TokenKind,
    parser::prelude::{BlockStatement, Expression, Program, Statement}
};

/// Evaluates `program` in the root scope of `env`. Scopes left unreachable
/// afterwards are released, except the ones captured by the result.
pub fn evaluate(program: &Program, env: &mut Environment) -> Object {
    let root = env.root();
    let result = eval_program(program, env, root);

    let roots = result.captured_scope()
        .into_iter()
        .collect::<Vec<ScopeId>>();
    env.sweep(&roots);

    log::debug!("evaluated {} statements to {}", program.statements.len(), result.type_name());

    result
}

fn eval_program(program: &Program, env: &mut Environment, scope: ScopeId) -> Object {
    let mut result = NULL;

    for statement in &program.statements {
        result = eval_statement(statement, env, scope);

        match result {
            Object::Return { value } => return *value,
            Object::Error { .. } => return result,
            _ => {}
        }
    }

    result
}

// return values stay wrapped so that enclosing blocks stop too
fn eval_block(block: &BlockStatement, env: &mut Environment, scope: ScopeId) -> Object {
    let mut result = NULL;

    for statement in &block.statements {
        result = eval_statement(statement, env, scope);

        if result.should_unwind() {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &mut Environment, scope: ScopeId) -> Object {
    match statement {
        Statement::Expression(statement) => eval_expression(&statement.expression, env, scope),
        Statement::Let(statement) => {
            let value = eval_expression(&statement.value, env, scope);

            if value.should_unwind() {
                return value;
            }

            env.set(scope, statement.name.value.clone(), value);

            NULL
        },
        Statement::Return(statement) => {
            let value = eval_expression(&statement.value, env, scope);

            if value.should_unwind() {
                return value;
            }

            Object::Return { value: Box::new(value) }
        },
        Statement::Block(block) => eval_block(block, env, scope),
    }
}

fn eval_expression(expression: &Expression, env: &mut Environment, scope: ScopeId) -> Object {
    match expression {
        Expression::Integer(integer) => Object::Integer { value: integer.value },
        Expression::String(string) => Object::String { value: string.value.clone() },
        Expression::Boolean(boolean) => Object::from_bool(boolean.value),
        Expression::Identifier(ident) => match env.get(scope, &ident.value) {
            Some(value) => value.clone(),
            None => Object::error(format!("identifier not found: {}", ident.value))
        },
        Expression::Prefix(prefix) => {
            let right = eval_expression(&prefix.right, env, scope);

            if right.should_unwind() {
                return right;
            }

            eval_prefix_expression(prefix.operator, right)
        },
        Expression::Infix(infix) => {
            let left = eval_expression(&infix.left, env, scope);

            if left.should_unwind() {
                return left;
            }

            let right = eval_expression(&infix.right, env, scope);

            if right.should_unwind() {
                return right;
            }

            eval_infix_expression(infix.operator, left, right)
        },
        Expression::If(if_) => {
            let condition = eval_expression(&if_.condition, env, scope);

            if condition.should_unwind() {
                return condition;
            }

            if condition.is_truthy() {
                eval_block(&if_.consequence, env, scope)
            } else if let Some(alternative) = &if_.alternative {
                eval_block(alternative, env, scope)
            } else {
                NULL
            }
        },
        Expression::Function(function) => Object::Function(Function {
            parameters: function.parameters.clone(),
            body: function.body.clone(),
            scope,
        }),
        Expression::Call(call) => {
            let function = eval_expression(&call.function, env, scope);

            if function.should_unwind() {
                return function;
            }

            let mut arguments = Vec::with_capacity(call.arguments.len());

            for argument in &call.arguments {
                let value = eval_expression(argument, env, scope);

                if value.should_unwind() {
                    return value;
                }

                arguments.push(value);
            }

            apply_function(function, arguments, env)
        },
    }
}

fn eval_prefix_expression(operator: TokenKind, right: Object) -> Object {
    match operator {
        TokenKind::Bang => Object::from_bool(!right.is_truthy()),
        TokenKind::Minus => match right {
            Object::Integer { value } => Object::Integer { value: value.wrapping_neg() },
            other => Object::error(format!("unknown operator: -{}", other.type_name()))
        },
        _ => Object::error(format!("unknown operator: {}{}", operator, right.type_name()))
    }
}

fn eval_infix_expression(operator: TokenKind, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer { value: left }, Object::Integer { value: right }) => {
            eval_integer_infix_expression(operator, *left, *right)
        },
        (Object::String { value: left }, Object::String { value: right }) => match operator {
            TokenKind::Plus => Object::String { value: format!("{left}{right}") },
            _ => Object::error(format!("unknown operator: STRING {operator} STRING"))
        },
        _ if is_comparable_by_identity(&left, &right) && operator == TokenKind::Equal => {
            Object::from_bool(is_identical(&left, &right))
        },
        _ if is_comparable_by_identity(&left, &right) && operator == TokenKind::NotEqual => {
            Object::from_bool(!is_identical(&left, &right))
        },
        _ if left.type_name() != right.type_name() => Object::error(format!(
            "type mismatch: {} {} {}",
            left.type_name(), operator, right.type_name()
        )),
        _ => Object::error(format!(
            "unknown operator: {} {} {}",
            left.type_name(), operator, right.type_name()
        ))
    }
}

fn eval_integer_infix_expression(operator: TokenKind, left: i64, right: i64) -> Object {
    match operator {
        TokenKind::Plus => Object::Integer { value: left.wrapping_add(right) },
        TokenKind::Minus => Object::Integer { value: left.wrapping_sub(right) },
        TokenKind::Asterisk => Object::Integer { value: left.wrapping_mul(right) },
        TokenKind::Slash if right == 0 => Object::error("division by zero"),
        // rounds toward zero
        TokenKind::Slash => Object::Integer { value: left.wrapping_div(right) },
        TokenKind::LessThan => Object::from_bool(left < right),
        TokenKind::GreaterThan => Object::from_bool(left > right),
        TokenKind::Equal => Object::from_bool(left == right),
        TokenKind::NotEqual => Object::from_bool(left != right),
        _ => Object::error(format!("unknown operator: INTEGER {operator} INTEGER"))
    }
}

fn is_comparable_by_identity(left: &Object, right: &Object) -> bool {
    let by_value = |object: &Object| matches!(object, Object::Integer { .. } | Object::String { .. });

    !by_value(left) && !by_value(right)
}

// booleans and null are singletons; every other value is a distinct instance
fn is_identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean { value: left }, Object::Boolean { value: right }) => left == right,
        (Object::Null, Object::Null) => true,
        _ => false
    }
}

fn apply_function(function: Object, arguments: Vec<Object>, env: &mut Environment) -> Object {
    let function = match function {
        Object::Function(function) => function,
        other => return Object::error(format!("not a function: {}", other.type_name()))
    };

    if function.parameters.len() != arguments.len() {
        return Object::error(format!(
            "wrong number of arguments: want={}, got={}",
            function.parameters.len(), arguments.len()
        ));
    }

    let scope = env.enclose(function.scope);

    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        env.set(scope, parameter.value.clone(), argument);
    }

    match eval_block(&function.body, env, scope) {
        Object::Return { value } => *value,
        result => result
    }
}
