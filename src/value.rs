//! Checked accessors over decoded response trees
//!
//! Every accessor either returns the value with the asserted type or an
//! error naming the offending key. Nothing is coerced: a number stored as
//! a string is a shape error, not a number.

use crate::{
    decode::kind_of,
    error::{SerpError, SerpResult},
    types::{SerpResponse, SerpResponseArray},
};
use serde_json::Value;

/// Typed lookups on a JSON object
pub trait ValueExt {
    /// Child `key` of this object
    fn field(&self, key: &str) -> SerpResult<&Value>;

    /// Value at a JSON pointer such as `/organic_results/0/title`
    fn pointer_at(&self, pointer: &str) -> SerpResult<&Value>;

    fn str_at(&self, key: &str) -> SerpResult<&str> {
        let value = self.field(key)?;
        value.as_str().ok_or_else(|| mismatch(key, "string", value))
    }

    fn f64_at(&self, key: &str) -> SerpResult<f64> {
        let value = self.field(key)?;
        value.as_f64().ok_or_else(|| mismatch(key, "number", value))
    }

    fn bool_at(&self, key: &str) -> SerpResult<bool> {
        let value = self.field(key)?;
        value.as_bool().ok_or_else(|| mismatch(key, "boolean", value))
    }

    fn object_at(&self, key: &str) -> SerpResult<&SerpResponse> {
        let value = self.field(key)?;
        value.as_object().ok_or_else(|| mismatch(key, "object", value))
    }

    fn array_at(&self, key: &str) -> SerpResult<&Vec<Value>> {
        let value = self.field(key)?;
        value.as_array().ok_or_else(|| mismatch(key, "array", value))
    }
}

impl ValueExt for SerpResponse {
    fn field(&self, key: &str) -> SerpResult<&Value> {
        self.get(key)
            .ok_or_else(|| SerpError::MissingField(key.to_string()))
    }

    fn pointer_at(&self, pointer: &str) -> SerpResult<&Value> {
        let (head, rest) = split_pointer(pointer)?;
        let child = self.field(&head)?;
        if rest.is_empty() {
            Ok(child)
        } else {
            child
                .pointer(rest)
                .ok_or_else(|| SerpError::MissingField(pointer.to_string()))
        }
    }
}

impl ValueExt for Value {
    fn field(&self, key: &str) -> SerpResult<&Value> {
        match self {
            Value::Object(map) => map.field(key),
            other => Err(mismatch(key, "object", other)),
        }
    }

    fn pointer_at(&self, pointer: &str) -> SerpResult<&Value> {
        if !pointer.is_empty() && !pointer.starts_with('/') {
            return Err(SerpError::InvalidInput(format!(
                "JSON pointer `{pointer}` must start with `/`"
            )));
        }
        self.pointer(pointer)
            .ok_or_else(|| SerpError::MissingField(pointer.to_string()))
    }
}

/// Positional lookup on a JSON array
pub trait ArrayExt {
    /// Element `index`, or [`SerpError::MissingField`] past the end
    fn element(&self, index: usize) -> SerpResult<&Value>;
}

impl ArrayExt for SerpResponseArray {
    fn element(&self, index: usize) -> SerpResult<&Value> {
        self.get(index)
            .ok_or_else(|| SerpError::MissingField(format!("[{index}]")))
    }
}

impl ArrayExt for Value {
    fn element(&self, index: usize) -> SerpResult<&Value> {
        match self {
            Value::Array(items) => items.element(index),
            other => Err(mismatch(&format!("[{index}]"), "array", other)),
        }
    }
}

fn split_pointer(pointer: &str) -> SerpResult<(String, &str)> {
    let body = pointer.strip_prefix('/').ok_or_else(|| {
        SerpError::InvalidInput(format!("JSON pointer `{pointer}` must start with `/`"))
    })?;
    let (head, rest) = match body.find('/') {
        Some(pos) => (&body[..pos], &body[pos..]),
        None => (body, ""),
    };
    Ok((head.replace("~1", "/").replace("~0", "~"), rest))
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> SerpError {
    SerpError::UnexpectedShape {
        path: key.to_string(),
        expected,
        found: kind_of(found),
    }
}
