//! Data source errors.

use thiserror::Error;

/// Failures at the Row Source boundary. Any of these ends the current
/// evaluation cycle; nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// No usable credentials, or the remote rejected them.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Transport failure or unexpected response status.
    #[error("connection error: {0}")]
    Connection(String),

    /// The workbook itself could not be found.
    #[error("spreadsheet not found: {0}")]
    NotFound(String),

    /// The language's sheet is not in the workbook.
    #[error("could not find sheet named '{name}'. Available sheets: {available:?}")]
    MissingSheet {
        /// Sheet title that was looked up.
        name: String,
        /// Titles actually present.
        available: Vec<String>,
    },

    /// The sheet has no rows past its header block.
    #[error("sheet '{0}' seems empty")]
    EmptySheet(String),

    /// The response or file could not be parsed.
    #[error("malformed sheet data: {0}")]
    Malformed(String),

    /// No profile is configured for the requested language.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O error while reading local sheets.
    #[error("I/O error: {0}")]
    Io(String),
}

impl SourceError {
    /// Short message suitable for showing next to the filters.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Authentication(_) => "Authentication Error: No credentials found.",
            Self::Connection(_) | Self::NotFound(_) => {
                "Connection Error: could not reach the catalogue."
            }
            Self::MissingSheet { .. } => "The catalogue sheet for this language is missing.",
            Self::EmptySheet(_) => "No data found.",
            Self::Malformed(_) | Self::Configuration(_) | Self::Io(_) => {
                "An unexpected error occurred."
            }
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for SourceError {
    fn from(err: csv::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Result type alias for row source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
