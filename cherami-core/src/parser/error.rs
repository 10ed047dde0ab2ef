//! Error types for response parsing.

use thiserror::Error;

/// A response body that could not be decoded.
///
/// Each variant names the decoding stage that failed.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The body is not the expected JSON value.
    #[error("Malformed response body: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The envelope lacks the field carrying the records.
    #[error("Missing field `{0}` in response")]
    MissingField(&'static str),

    /// The field exists but is not a JSON-encoded string.
    #[error("Field `{0}` is not an encoded string")]
    NotEncoded(&'static str),

    /// The encoded string does not hold a JSON array.
    #[error("Malformed encoded array: {0}")]
    InnerArray(#[source] serde_json::Error),

    /// One element of the array is not a valid record.
    #[error("Malformed record at index {index}: {reason}")]
    Record {
        /// Position of the element in the array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result type alias for parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = ParseError::MissingField("results");
        assert_eq!(err.to_string(), "Missing field `results` in response");
    }

    #[test]
    fn not_encoded_display() {
        let err = ParseError::NotEncoded("results");
        assert_eq!(err.to_string(), "Field `results` is not an encoded string");
    }

    #[test]
    fn record_display() {
        let err = ParseError::Record {
            index: 3,
            reason: "missing field `owner`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed record at index 3: missing field `owner`"
        );
    }

    #[test]
    fn envelope_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ParseError::Envelope(source);
        assert!(std::error::Error::source(&err).is_some());
    }
}
