use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
    #[error("no profile configured for language {0}")]
    MissingProfile(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
