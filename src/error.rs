//! Error types for sql_bench

use thiserror::Error;

/// Result type for engine and benchmark operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the engine and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// The SQL text could not be tokenized
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    /// A row did not have the same number of columns as the first row of its result set
    #[error("Arity mismatch in row {row}: expected {expected} columns, found {found}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Query execution failed: {0}")]
    QueryExecution(String),

    #[error("SQL generation failed: {0}")]
    Generation(String),

    #[error("Service request failed: {0}")]
    Service(String),

    #[error("Invalid test record at {path}:{line}: {message}")]
    InvalidTestRecord {
        path: String,
        line: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
