use thiserror::Error;
use typepath_ast::Expression;

/// Errors that abort a resolution. Each carries the rendered sub-expression
/// or name that triggered it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unsupported expression shape at '{node}': {reason}")]
    UnsupportedExpression { node: String, reason: String },

    #[error("Type name '{name}' not found")]
    TypeNameNotFound { name: String },

    #[error("Malformed cast arguments in '{node}': expected exactly one string literal type name, found {found} constant argument(s)")]
    MalformedCastArguments { node: String, found: usize },

    #[error("Field '{field}' not found on type '{type_name}' while resolving '{path}'")]
    FieldNotFound {
        type_name: String,
        field: String,
        path: String,
    },
}

/// Fieldless discriminant of [`ResolveError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    UnsupportedExpression,
    TypeNameNotFound,
    MalformedCastArguments,
    FieldNotFound,
}

impl ResolveError {
    pub fn unsupported(node: &Expression, reason: impl Into<String>) -> Self {
        Self::UnsupportedExpression {
            node: node.to_string(),
            reason: reason.into(),
        }
    }

    pub fn type_name_not_found(name: impl Into<String>) -> Self {
        Self::TypeNameNotFound { name: name.into() }
    }

    pub fn malformed_cast(node: &Expression, found: usize) -> Self {
        Self::MalformedCastArguments {
            node: node.to_string(),
            found,
        }
    }

    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            Self::UnsupportedExpression { .. } => ResolveErrorKind::UnsupportedExpression,
            Self::TypeNameNotFound { .. } => ResolveErrorKind::TypeNameNotFound,
            Self::MalformedCastArguments { .. } => ResolveErrorKind::MalformedCastArguments,
            Self::FieldNotFound { .. } => ResolveErrorKind::FieldNotFound,
        }
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
