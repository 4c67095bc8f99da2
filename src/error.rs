//! Error types for fetching and rendering transaction history.

use thiserror::Error;

use crate::client::ClientError;

/// Result type alias for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors that abort an invocation.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The transaction client failed (network, auth, malformed response, deadline)
    #[error("Error retrieving transactions: {0}")]
    Transport(#[from] ClientError),

    /// A booking date did not parse as `YYYY-MM-DD`
    #[error("Failed to parse booking date {date:?}: {source}")]
    DateParse {
        date: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The server stopped growing pages before every match was retrieved
    #[error("Server returned only {fetched} of {matches} matching transactions")]
    IncompletePages { fetched: usize, matches: usize },

    /// Page-size hint must be positive
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// Writing to the output stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
