//! Shared utility functions for API handlers.

use std::collections::HashMap;

use axum::body::Bytes;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::validation::Params;

/// Decode a request body as JSON whatever its content type.
///
/// An empty or all-whitespace body means no body.
pub(crate) fn parse_body(body: &Bytes) -> Result<Option<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::invalid_argument(format!("request body is not valid JSON: {}", e)))
}

/// Merge request parameters into the single map operations validate.
///
/// Later sources win on key collisions: body, then query string, then path.
pub(crate) fn merge_params(
    path: HashMap<String, String>,
    query: HashMap<String, String>,
    body: Option<Value>,
) -> Result<Params, ApiError> {
    let mut params = match body {
        None | Some(Value::Null) => Params::new(),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(ApiError::invalid_argument("request body must be a JSON object")),
    };

    for (key, value) in query.into_iter().chain(path) {
        params.insert(key, Value::String(value));
    }

    Ok(params)
}
