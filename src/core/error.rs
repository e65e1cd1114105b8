//! Custom error types for Duologue
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Duologue operations
#[derive(Error, Debug)]
pub enum DuologueError {
    /// A required string input was empty/whitespace or otherwise unusable
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A numeric input fell below its minimum
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// OpenAI connection or API errors
    #[error("OpenAI error: {0}")]
    OpenAi(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for Duologue operations
pub type Result<T> = std::result::Result<T, DuologueError>;

impl DuologueError {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an out-of-range error
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Create an OpenAI error
    pub fn openai(msg: impl Into<String>) -> Self {
        Self::OpenAi(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
