use std::fmt::Display;

use crate::parser::prelude::{BlockStatement, Identifier};

use super::environment::ScopeId;

pub const TRUE: Object = Object::Boolean { value: true };
pub const FALSE: Object = Object::Boolean { value: false };
pub const NULL: Object = Object::Null;

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer {
        value: i64
    },
    Boolean {
        value: bool
    },
    String {
        value: String
    },
    Null,
    Return {
        value: Box<Object>
    },
    Function(Function),
    Error {
        message: String
    },
}

/// Closure value. `scope` is the scope the literal was evaluated in.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub scope: ScopeId,
}

impl Object {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }

    pub fn from_bool(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer { .. } => "INTEGER",
            Self::Boolean { .. } => "BOOLEAN",
            Self::String { .. } => "STRING",
            Self::Null => "NULL",
            Self::Return { .. } => "RETURN_VALUE",
            Self::Function(_) => "FUNCTION",
            Self::Error { .. } => "ERROR",
        }
    }

    /// Errors and return values abandon the rest of the enclosing evaluation.
    pub fn should_unwind(&self) -> bool {
        matches!(self, Self::Return { .. } | Self::Error { .. })
    }

    // null and false are falsy, everything else (0 and "" included) is truthy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean { value: false })
    }

    /// Scope captured by this value, if any.
    pub fn captured_scope(&self) -> Option<ScopeId> {
        match self {
            Self::Function(function) => Some(function.scope),
            Self::Return { value } => value.captured_scope(),
            _ => None
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer { value } => write!(f, "{value}"),
            Self::Boolean { value } => write!(f, "{value}"),
            Self::String { value } => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
            Self::Return { value } => write!(f, "{value}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Error { message } => write!(f, "ERROR: {message}"),
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|parameter| parameter.value.as_str())
            .collect::<Vec<&str>>()
            .join(", ");

        write!(f, "fn({parameters}) {}", self.body)
    }
}
