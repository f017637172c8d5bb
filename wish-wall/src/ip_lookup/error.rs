use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for IP lookups
pub type IpLookupResult<T> = Result<T, IpLookupError>;

/// Errors that can occur while resolving the caller's address
#[derive(Debug, Error)]
pub enum IpLookupError {
    /// Request could not be sent or the body could not be decoded
    #[error("IP lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Echo endpoint answered with a non-success status
    #[error("IP lookup returned status {0}")]
    UnexpectedStatus(StatusCode),

    /// Lookup service could not be reached
    #[error("IP lookup service unreachable: {0}")]
    Unreachable(String),
}
