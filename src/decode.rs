//! Response decoding
//!
//! The service reports business failures (bad key, exhausted credit, rate
//! limiting) inside otherwise successful JSON bodies, under a top-level
//! [`ERROR_FIELD`]. Decoding therefore has three outcomes: a parse failure,
//! an embedded service error, or the full response tree.

use crate::{
    error::{SerpError, SerpResult},
    types::{SerpResponse, SerpResponseArray},
};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Top-level key the service uses to report an error
pub const ERROR_FIELD: &str = "error";

/// Parse `reader` as a JSON object.
///
/// The reader is consumed and dropped before this returns, whatever the
/// outcome.
pub fn decode_json<R: Read>(reader: R) -> SerpResult<SerpResponse> {
    match parse(reader)? {
        Value::Object(map) => {
            check_error(&map)?;
            Ok(map)
        }
        other => Err(SerpError::DecodeError(format!(
            "Expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Parse `reader` as a JSON array.
///
/// An object root is accepted only to surface the service's embedded error.
pub fn decode_json_array<R: Read>(reader: R) -> SerpResult<SerpResponseArray> {
    match parse(reader)? {
        Value::Array(items) => Ok(items),
        Value::Object(map) => {
            check_error(&map)?;
            Err(SerpError::DecodeError(
                "Expected a JSON array, got object".to_string(),
            ))
        }
        other => Err(SerpError::DecodeError(format!(
            "Expected a JSON array, got {}",
            kind_of(&other)
        ))),
    }
}

/// Decode a JSON object stored on disk
pub fn decode_file(path: impl AsRef<Path>) -> SerpResult<SerpResponse> {
    let file = File::open(path.as_ref()).map_err(|e| {
        SerpError::DecodeError(format!("Cannot open {}: {e}", path.as_ref().display()))
    })?;
    decode_json(BufReader::new(file))
}

/// Decode a JSON array stored on disk
pub fn decode_array_file(path: impl AsRef<Path>) -> SerpResult<SerpResponseArray> {
    let file = File::open(path.as_ref()).map_err(|e| {
        SerpError::DecodeError(format!("Cannot open {}: {e}", path.as_ref().display()))
    })?;
    decode_json_array(BufReader::new(file))
}

/// Body as text, for HTML output
pub fn decode_text(body: Vec<u8>) -> SerpResult<String> {
    String::from_utf8(body)
        .map_err(|e| SerpError::DecodeError(format!("Response is not valid UTF-8: {e}")))
}

/// Embedded error carried by `map`, if any.
///
/// An empty string or `null` is not an error. Non-string values are
/// reported with their JSON rendering.
pub fn embedded_error(map: &SerpResponse) -> Option<String> {
    match map.get(ERROR_FIELD)? {
        Value::Null => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn check_error(map: &SerpResponse) -> SerpResult<()> {
    match embedded_error(map) {
        Some(message) => {
            log::warn!("SerpApi returned an error: {message}");
            Err(SerpError::ApiError(message))
        }
        None => Ok(()),
    }
}

fn parse<R: Read>(reader: R) -> SerpResult<Value> {
    let value = serde_json::from_reader(reader)?;
    Ok(value)
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
