//! Error types for the URN codec.

use thiserror::Error;

/// Main error type for norm identifier operations.
#[derive(Debug, Error)]
pub enum NormaError {
    /// Act type string matched no known synonym or token.
    #[error("Unknown act type: '{0}'")]
    UnknownActType(String),

    /// Structurally inconsistent reference fields.
    #[error("Invalid norm reference: {0}")]
    InvalidReference(String),

    /// Decoder input does not match the canonical URL/URN grammar.
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// Invalid date format.
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD (e.g., 1942-03-16)")]
    InvalidDate(String),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, NormaError>;
