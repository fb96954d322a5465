//! Typed access to fields of a loosely-shaped JSON request body.
//!
//! Bodies are read as `serde_json::Value` so a wrongly typed field becomes a
//! domain validation failure (422) instead of a generic deserialization error.

use crate::error::CampError;
use serde_json::{Map, Value};

pub(crate) type JsonObject = Map<String, Value>;

pub(crate) fn into_object(body: Value) -> Result<JsonObject, CampError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(CampError::BadRequest(
            "request body must be a JSON object".to_string(),
        )),
    }
}

/// `None` when absent, `Some(None)` when present but not a string.
pub(crate) fn str_field(obj: &JsonObject, key: &str) -> Option<Option<String>> {
    obj.get(key).map(|v| v.as_str().map(str::to_string))
}

/// `None` when absent, `Some(None)` when present but not an integer.
pub(crate) fn int_field(obj: &JsonObject, key: &str) -> Option<Option<i64>> {
    obj.get(key).map(Value::as_i64)
}
