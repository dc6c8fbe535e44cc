use crate::field::Field;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Unexpected field '{0}'")]
    UnknownField(String),

    #[error("Unexpected parameter '{0}'")]
    UnknownParameter(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("No {field} frequency for term '{term}'")]
    MissingTermFrequency { field: Field, term: String },

    #[error("Unknown document '{0}'")]
    UnknownDocument(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
