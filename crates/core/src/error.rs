//! Error types shared across the phone agent crates

use thiserror::Error;

/// Top-level error
///
/// Each crate keeps its own error enum and converts into this one at the
/// crate boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Retrieval error: {0}")]
    Rag(String),

    #[error("Transfer error: {0}")]
    Transfer(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Call control error: {0}")]
    CallControl(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias using the core error
pub type Result<T> = std::result::Result<T, Error>;

impl From<crate::traits::ToolError> for Error {
    fn from(err: crate::traits::ToolError) -> Self {
        Error::Tool(err.to_string())
    }
}
