//! Schema for wish records shared between the wall client and the sync adapter
//!
//! The sync store is a loosely typed document store and does not enforce this
//! schema, so every record read back from it is parsed again before use.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;
use validator::Validate;

pub use error::{ValidationError, ValidationResult};

/// Maximum length of a wish text (inclusive), in UTF-16 code units
pub const MAX_TEXT_CHARS: usize = 42;

/// Lowest valid canvas coordinate, in percent
pub const MIN_COORDINATE: f64 = 0.0;

/// Highest valid canvas coordinate, in percent
pub const MAX_COORDINATE: f64 = 100.0;

/// A single wish placed on the shared canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    /// Client generated unique identifier
    pub id: String,
    /// User supplied text
    #[validate(custom(function = "validate_text_length"))]
    pub text: String,
    /// Horizontal position in percent of the canvas width
    #[validate(custom(function = "validate_coordinate"))]
    pub location_x: f64,
    /// Vertical position in percent of the canvas height
    #[validate(custom(function = "validate_coordinate"))]
    pub location_y: f64,
    /// IPv4 or IPv6 literal of the submitter
    #[validate(ip(message = "invalid_ip_address"))]
    pub ip_address: String,
    /// Client side creation time in milliseconds since the Unix epoch
    #[validate(custom(function = "validate_timestamp"))]
    pub created_at: f64,
}

/// Attribute names of a stored wish document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum WishAttribute {
    /// Unique identifier
    Id,
    /// Wish text
    Text,
    /// Horizontal coordinate
    LocationX,
    /// Vertical coordinate
    LocationY,
    /// Submitter IP address
    IpAddress,
    /// Creation timestamp
    CreatedAt,
}

impl WishAttribute {
    /// Name of the struct field carrying this attribute
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Text => "text",
            Self::LocationX => "location_x",
            Self::LocationY => "location_y",
            Self::IpAddress => "ip_address",
            Self::CreatedAt => "created_at",
        }
    }
}

impl Wish {
    /// Parses an untyped document into a wish, enforcing every field constraint.
    ///
    /// Unknown attributes are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Malformed` if a field is missing or has the
    /// wrong type, and `ValidationError::Constraint` if a field is out of bounds.
    pub fn parse(candidate: &Value) -> ValidationResult<Self> {
        let wish = Self::deserialize(candidate)?;
        wish.check()?;
        Ok(wish)
    }

    /// Validates the constraints of an already typed record
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Constraint` listing every violated field
    pub fn check(&self) -> ValidationResult<()> {
        self.validate().map_err(ValidationError::from)
    }
}

/// Returns true iff the candidate is a well formed wish satisfying every constraint
#[must_use]
pub fn is_valid(candidate: &Value) -> bool {
    Wish::parse(candidate).is_ok()
}

/// Text length as browsers report it, so the bound matches the web client
fn validate_text_length(text: &str) -> Result<(), validator::ValidationError> {
    if text.encode_utf16().count() <= MAX_TEXT_CHARS {
        Ok(())
    } else {
        Err(validator::ValidationError::new("text_too_long"))
    }
}

fn validate_coordinate(value: f64) -> Result<(), validator::ValidationError> {
    if value.is_finite() && (MIN_COORDINATE..=MAX_COORDINATE).contains(&value) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("coordinate_out_of_range"))
    }
}

fn validate_timestamp(value: f64) -> Result<(), validator::ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("timestamp_not_finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_document() -> Value {
        json!({
            "id": "6f1c2f7e-6a51-4b8e-9a8e-0a4f1d6b1c11",
            "text": "peace",
            "locationX": 23.54,
            "locationY": 76.89,
            "ipAddress": "203.0.113.7",
            "createdAt": 1_718_000_000_000.0,
        })
    }

    fn with(field: WishAttribute, value: Value) -> Value {
        let mut document = valid_document();
        document[field.to_string()] = value;
        document
    }

    fn without(field: WishAttribute) -> Value {
        let mut document = valid_document();
        document
            .as_object_mut()
            .unwrap()
            .remove(&field.to_string());
        document
    }

    #[test]
    fn test_parse_valid_document() {
        let wish = Wish::parse(&valid_document()).unwrap();
        assert_eq!(wish.text, "peace");
        assert!((wish.location_x - 23.54).abs() < f64::EPSILON);
        assert_eq!(wish.ip_address, "203.0.113.7");
        assert!((wish.created_at - 1_718_000_000_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serializes_camel_case() {
        let wish = Wish::parse(&valid_document()).unwrap();
        let value = serde_json::to_value(&wish).unwrap();
        assert_eq!(value, valid_document());
    }

    #[test]
    fn test_attribute_names_match_serialized_fields() {
        assert_eq!(WishAttribute::LocationX.to_string(), "locationX");
        assert_eq!(WishAttribute::IpAddress.to_string(), "ipAddress");
        assert_eq!(WishAttribute::CreatedAt.to_string(), "createdAt");
    }

    #[test]
    fn test_text_length_boundary() {
        let exact = "a".repeat(MAX_TEXT_CHARS);
        assert!(is_valid(&with(WishAttribute::Text, json!(exact))));

        let over = "a".repeat(MAX_TEXT_CHARS + 1);
        let err = Wish::parse(&with(WishAttribute::Text, json!(over))).unwrap_err();
        assert!(matches!(err, ValidationError::Constraint(_)));
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn test_text_too_long_is_distinguished() {
        let long = Wish::parse(&with(WishAttribute::Text, json!("a".repeat(43)))).unwrap_err();
        assert!(long.is_text_too_long());

        let bad_ip = Wish::parse(&with(WishAttribute::IpAddress, json!("nowhere"))).unwrap_err();
        assert!(!bad_ip.is_text_too_long());
        assert!(bad_ip.violates(WishAttribute::IpAddress));

        let off_canvas = Wish::parse(&with(WishAttribute::LocationY, json!(101))).unwrap_err();
        assert!(off_canvas.violates(WishAttribute::LocationY));
        assert!(!off_canvas.violates(WishAttribute::LocationX));

        let malformed = Wish::parse(&json!({})).unwrap_err();
        assert!(!malformed.is_text_too_long());
    }

    #[test]
    fn test_text_length_counts_utf16_units() {
        // 42 units, 84 bytes
        let accented = "é".repeat(42);
        assert!(is_valid(&with(WishAttribute::Text, json!(accented))));

        // Each emoji is a surrogate pair
        let half = "😀".repeat(21);
        assert!(is_valid(&with(WishAttribute::Text, json!(half))));

        let full = "😀".repeat(42);
        let err = Wish::parse(&with(WishAttribute::Text, json!(full))).unwrap_err();
        assert!(err.is_text_too_long());
    }

    #[test]
    fn test_empty_text_is_valid() {
        assert!(is_valid(&with(WishAttribute::Text, json!(""))));
    }

    #[test]
    fn test_coordinate_bounds() {
        for edge in [0.0, 100.0, 0.01, 99.99] {
            assert!(is_valid(&with(WishAttribute::LocationX, json!(edge))));
            assert!(is_valid(&with(WishAttribute::LocationY, json!(edge))));
        }
        for out in [-0.01, 100.01, 150.0, -1.0] {
            assert!(!is_valid(&with(WishAttribute::LocationX, json!(out))));
            assert!(!is_valid(&with(WishAttribute::LocationY, json!(out))));
        }
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let mut wish = Wish::parse(&valid_document()).unwrap();
        wish.location_x = f64::NAN;
        assert!(wish.check().is_err());

        wish.location_x = 50.0;
        wish.location_y = f64::INFINITY;
        assert!(wish.check().is_err());
    }

    #[test]
    fn test_ip_address_syntax() {
        for ip in ["127.0.0.1", "2001:db8::1", "::1", "0.0.0.0"] {
            assert!(is_valid(&with(WishAttribute::IpAddress, json!(ip))), "{ip}");
        }
        for ip in ["", "localhost", "256.1.1.1", "1.2.3", "2001:db8:::1"] {
            assert!(!is_valid(&with(WishAttribute::IpAddress, json!(ip))), "{ip}");
        }
    }

    #[test]
    fn test_missing_fields_rejected() {
        for field in [
            WishAttribute::Id,
            WishAttribute::Text,
            WishAttribute::LocationX,
            WishAttribute::LocationY,
            WishAttribute::IpAddress,
            WishAttribute::CreatedAt,
        ] {
            let err = Wish::parse(&without(field)).unwrap_err();
            assert!(matches!(err, ValidationError::Malformed(_)), "{field}");
        }
    }

    #[test]
    fn test_wrong_types_rejected() {
        assert!(!is_valid(&with(WishAttribute::Id, json!(42))));
        assert!(!is_valid(&with(WishAttribute::Text, json!(null))));
        assert!(!is_valid(&with(WishAttribute::LocationX, json!("50"))));
        assert!(!is_valid(&with(WishAttribute::LocationY, json!([1]))));
        assert!(!is_valid(&with(WishAttribute::IpAddress, json!(127))));
        assert!(!is_valid(&with(WishAttribute::CreatedAt, json!("now"))));
        assert!(!is_valid(&with(WishAttribute::CreatedAt, json!(null))));
    }

    #[test]
    fn test_any_numeric_timestamp_accepted() {
        for created_at in [json!(1_718_000_000_000.5), json!(1e20), json!(0), json!(-5)] {
            assert!(
                is_valid(&with(WishAttribute::CreatedAt, created_at.clone())),
                "{created_at}"
            );
        }

        let mut wish = Wish::parse(&valid_document()).unwrap();
        wish.created_at = f64::NAN;
        let err = wish.check().unwrap_err();
        assert!(err.violates(WishAttribute::CreatedAt));
        assert!(!err.is_text_too_long());
    }

    #[test]
    fn test_non_object_candidates_rejected() {
        for candidate in [
            json!(null),
            json!(true),
            json!(12),
            json!("wish"),
            json!([]),
            json!({}),
        ] {
            assert!(!is_valid(&candidate), "{candidate}");
        }
    }

    #[test]
    fn test_unknown_attributes_ignored() {
        let mut document = with(WishAttribute::Id, json!("abc"));
        document["serverCreatedAt"] = json!(1_718_000_000_001_i64);
        assert!(is_valid(&document));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let good = valid_document();
        let bad = with(WishAttribute::LocationX, json!(150));
        for _ in 0..3 {
            assert!(is_valid(&good));
            assert!(!is_valid(&bad));
        }
    }
}
