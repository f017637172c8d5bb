//! Error types for sync service operations

use thiserror::Error;

/// Result type alias for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync service error types
#[derive(Debug, Error)]
pub enum SyncError {
    /// Failed to serialize a record into a document
    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The service cannot be reached
    #[error("Sync service unavailable: {0}")]
    Unavailable(String),
}
