use std::error::Error;
use std::fmt;

use crate::infrastructure::evm::EvmClientError;
use crate::infrastructure::persistence::error::DbError;
use crate::infrastructure::queue::QueueError;

/// Error type for block scanning operations
#[derive(Debug)]
pub enum ScannerError {
    ChainClientError(EvmClientError),
    DbError(DbError),
    QueueError(QueueError),
    ConfigError(String),
    ProcessingError(String),
}

impl fmt::Display for ScannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScannerError::ChainClientError(e) => write!(f, "Chain client error: {}", e),
            ScannerError::DbError(e) => write!(f, "Database error: {}", e),
            ScannerError::QueueError(e) => write!(f, "Queue error: {}", e),
            ScannerError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ScannerError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl Error for ScannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ScannerError::ChainClientError(e) => Some(e),
            ScannerError::DbError(e) => Some(e),
            ScannerError::QueueError(e) => Some(e),
            ScannerError::ConfigError(_) => None,
            ScannerError::ProcessingError(_) => None,
        }
    }
}

impl From<EvmClientError> for ScannerError {
    fn from(error: EvmClientError) -> Self {
        ScannerError::ChainClientError(error)
    }
}

impl From<DbError> for ScannerError {
    fn from(error: DbError) -> Self {
        ScannerError::DbError(error)
    }
}

impl From<QueueError> for ScannerError {
    fn from(error: QueueError) -> Self {
        ScannerError::QueueError(error)
    }
}

/// Error type for event projection
#[derive(Debug)]
pub enum ProjectionError {
    DbError(DbError),
    QueueError(QueueError),
    /// A text record key outside the allow-list. Not retryable locally; the
    /// broker's own retry policy handles (and eventually fails) the job.
    DisallowedTextKey(String),
    ProcessingError(String),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::DbError(e) => write!(f, "Database error: {}", e),
            ProjectionError::QueueError(e) => write!(f, "Queue error: {}", e),
            ProjectionError::DisallowedTextKey(key) => {
                write!(f, "Text record key '{}' is not allowed", key)
            }
            ProjectionError::ProcessingError(msg) => write!(f, "Projection error: {}", msg),
        }
    }
}

impl Error for ProjectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProjectionError::DbError(e) => Some(e),
            ProjectionError::QueueError(e) => Some(e),
            ProjectionError::DisallowedTextKey(_) => None,
            ProjectionError::ProcessingError(_) => None,
        }
    }
}

impl From<DbError> for ProjectionError {
    fn from(error: DbError) -> Self {
        ProjectionError::DbError(error)
    }
}

impl From<QueueError> for ProjectionError {
    fn from(error: QueueError) -> Self {
        ProjectionError::QueueError(error)
    }
}
