//! Error types for wish schema validation

use thiserror::Error;

use crate::WishAttribute;

/// Result type alias for schema validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A candidate record does not satisfy the wish schema
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A field is missing or has the wrong type
    #[error("Malformed wish record: {0}")]
    Malformed(String),

    /// One or more field constraints are violated
    #[error("Wish record violates constraints: {0}")]
    Constraint(#[from] validator::ValidationErrors),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl ValidationError {
    /// Whether the constraint on `attribute` is violated
    #[must_use]
    pub fn violates(&self, attribute: WishAttribute) -> bool {
        match self {
            Self::Constraint(errors) => errors.errors().contains_key(attribute.field_name()),
            Self::Malformed(_) => false,
        }
    }

    /// Whether the wish text exceeds the length bound
    #[must_use]
    pub fn is_text_too_long(&self) -> bool {
        self.violates(WishAttribute::Text)
    }
}
