//! Error handling for the wish submission flow

use thiserror::Error;
use wish_schema::{ValidationError, MAX_TEXT_CHARS};
use wish_sync::SyncError;

use crate::ip_lookup::IpLookupError;

/// Result type alias for wish operations
pub type WishResult<T> = Result<T, WishError>;

/// Errors surfaced by a single wall interaction
#[derive(Debug, Error)]
pub enum WishError {
    /// The candidate record fails the wish schema
    #[error("Invalid wish: {0}")]
    Validation(#[from] ValidationError),

    /// The caller's IP address could not be resolved
    #[error("IP lookup failed: {0}")]
    Network(#[from] IpLookupError),

    /// The sync service did not accept the write
    #[error("Sync failed: {0}")]
    Sync(#[from] SyncError),
}

impl WishError {
    /// Short message suitable for showing to the person who submitted the wish
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_text_too_long() {
            format!("Wishes can be at most {MAX_TEXT_CHARS} characters")
        } else {
            "Your wish could not be sent, please try again".to_string()
        }
    }

    /// Whether resubmitting the same text could succeed
    #[must_use]
    pub fn allow_retry(&self) -> bool {
        !self.is_text_too_long()
    }

    fn is_text_too_long(&self) -> bool {
        matches!(self, Self::Validation(err) if err.is_text_too_long())
    }
}
