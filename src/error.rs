use thiserror::Error;

/// Errors that can occur while fetching or analyzing a table.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Table not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for AdvisorError {
    fn from(err: sqlx::Error) -> Self {
        AdvisorError::ConnectionError(err.to_string())
    }
}

/// Result type for advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;
