//! Response parsing.
//!
//! Turns raw response bodies into records. List endpoints come in two
//! envelopes:
//!
//! | Envelope | Body | Used by |
//! |----------|------|---------|
//! | [`Envelope::Array`] | `[{...}, {...}]` | `GET messages` |
//! | [`Envelope::DoubleEncoded`] | `{"results": "[{...}, {...}]"}` | `GET circles` |
//!
//! The double-encoded form is how the backend ships circle lists: the array
//! is serialized to a string first and that string is placed in the object.
//! It has to be decoded twice.
//!
//! Every failure is a [`ParseError`]; nothing here panics on bad input.

mod error;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::model::{LoginResponse, ResponseText};

pub use error::{ParseError, Result};

/// How a list of records is wrapped in a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// The body is a plain JSON array.
    Array,
    /// The body is an object whose `field` holds the array as a JSON string.
    DoubleEncoded {
        /// Name of the field holding the encoded array.
        field: &'static str,
    },
}

/// A record type returned by a list endpoint.
pub trait Record: DeserializeOwned {
    /// Envelope the endpoint wraps these records in.
    const ENVELOPE: Envelope;
}

/// Parses a list body into records using the record's own envelope.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the stage that failed.
pub fn parse<R: Record>(raw: &[u8]) -> Result<Vec<R>> {
    parse_with(raw, R::ENVELOPE)
}

/// Parses a list body with an explicit envelope.
///
/// Each array element must be a JSON object.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the stage that failed.
pub fn parse_with<R: DeserializeOwned>(raw: &[u8], envelope: Envelope) -> Result<Vec<R>> {
    let elements = match envelope {
        Envelope::Array => {
            serde_json::from_slice::<Vec<Value>>(raw).map_err(ParseError::Envelope)?
        }
        Envelope::DoubleEncoded { field } => {
            let outer: Map<String, Value> =
                serde_json::from_slice(raw).map_err(ParseError::Envelope)?;
            let encoded = outer
                .get(field)
                .ok_or(ParseError::MissingField(field))?
                .as_str()
                .ok_or(ParseError::NotEncoded(field))?;
            serde_json::from_str::<Vec<Value>>(encoded).map_err(ParseError::InnerArray)?
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| decode_record(index, element))
        .collect()
}

fn decode_record<R: DeserializeOwned>(index: usize, element: Value) -> Result<R> {
    if !element.is_object() {
        return Err(ParseError::Record {
            index,
            reason: "element is not an object".to_string(),
        });
    }
    serde_json::from_value(element).map_err(|e| ParseError::Record {
        index,
        reason: e.to_string(),
    })
}

/// Parses a single JSON object body.
///
/// # Errors
///
/// Returns [`ParseError::Envelope`] if the body does not decode as `T`.
pub fn parse_object<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    serde_json::from_slice(raw).map_err(ParseError::Envelope)
}

/// Extracts the `response` text from an acknowledgement body.
///
/// # Errors
///
/// Returns [`ParseError::Envelope`] if the body is not `{"response": ...}`.
pub fn parse_response_text(raw: &[u8]) -> Result<String> {
    parse_object::<ResponseText>(raw).map(|text| text.response)
}

/// Parses a login response.
///
/// # Errors
///
/// Returns [`ParseError::Envelope`] if the body carries no session token.
pub fn parse_login(raw: &[u8]) -> Result<LoginResponse> {
    parse_object(raw)
}
