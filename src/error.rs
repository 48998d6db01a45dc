//! Error types and result definitions

use thiserror::Error;

/// Result type alias for tarql operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tarql.
///
/// Everything except [`Error::Evaluation`] aborts a run. Evaluation errors are
/// row-local unless the pipeline runs in strict mode.
#[derive(Error, Debug)]
pub enum Error {
    /// Contradictory or malformed options, detected before streaming begins
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed tabular syntax in the input
    #[error("Parse error at row {row}: {message}")]
    Parse { row: u64, message: String },

    /// The query template itself is unusable
    #[error("Template error: {0}")]
    Template(String),

    /// A specific row's bindings made evaluation fail
    #[error("Evaluation error at row {row}: {message}")]
    Evaluation { row: u64, message: String },

    /// IO error on input or output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Human readable name of the stage that failed, used in diagnostics.
    pub fn stage(&self) -> String {
        match self {
            Error::Config(_) => "configuration".to_string(),
            Error::Parse { row, .. } | Error::Evaluation { row, .. } => format!("row {}", row),
            Error::Template(_) => "template".to_string(),
            Error::Io(_) => "io".to_string(),
        }
    }

    /// Whether the pipeline may skip the offending row and keep streaming.
    pub fn is_row_local(&self) -> bool {
        matches!(self, Error::Evaluation { .. })
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        let row = err.position().map_or(0, |pos| pos.record() + 1);
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => Error::Io(io),
                other => Error::Parse { row, message: format!("{:?}", other) },
            }
        } else {
            Error::Parse {
                row,
                message: err.to_string(),
            }
        }
    }
}
