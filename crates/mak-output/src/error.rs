use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("csv buffer error: {0}")]
    Buffer(String),
    #[error("csv has {found} columns, expected {expected}")]
    ColumnCount { expected: usize, found: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
