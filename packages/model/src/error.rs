use thiserror::Error;

/// Errors raised while loading or validating a model definition
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Type '{0}' is declared more than once")]
    DuplicateType(String),

    #[error("Field '{field}' is declared more than once on type '{type_name}'")]
    DuplicateField { type_name: String, field: String },

    #[error("Field '{type_name}.{field}' refers to undeclared type '{referenced}'")]
    UnknownFieldType {
        type_name: String,
        field: String,
        referenced: String,
    },

    #[error("Choice field '{type_name}.{field}' declares no candidate types")]
    EmptyChoice { type_name: String, field: String },
}

pub type ModelResult<T> = Result<T, ModelError>;
