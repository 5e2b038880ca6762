//! GraphQL response envelope and error decoding
//!
//! A response is a wrapper around the real data: `data` holds one object
//! whose single field is named after the root field of the query, and
//! `errors` carries everything the server rejected. [`unwrap_root`] strips
//! the wrapper; [`extract_business_error`] recognizes the directory API's
//! business errors among generic GraphQL errors.

use crate::core::error::{BusinessError, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker prefix of business errors in the legacy `errorType` convention
pub const BUSINESS_ERROR_PREFIX: &str = "BUSINESS:";

/// The standard GraphQL response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLResponseError>,
}

impl GraphQLResponse {
    /// A successful response carrying `data`
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A failed response carrying a single error
    pub fn error(error: GraphQLResponseError) -> Self {
        Self {
            data: None,
            errors: vec![error],
        }
    }
}

/// One entry of a response's `errors` array
///
/// `error_type` is the legacy marker some servers emit next to the standard
/// fields; newer servers put the code into `extensions` instead. Both are
/// kept verbatim so either convention survives a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponseError {
    pub message: String,
    #[serde(
        rename = "errorType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphQLResponseError {
    /// A plain error with nothing but a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: None,
            path: None,
            extensions: None,
        }
    }

    /// Encode a business error in both wire conventions at once:
    /// `errorType: "BUSINESS:<code>"` and the full payload (code included)
    /// in `extensions`
    pub fn business(error: &BusinessError) -> Self {
        let extensions = match serde_json::to_value(error) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self {
            message: error.to_string(),
            error_type: Some(format!("{}{}", BUSINESS_ERROR_PREFIX, error.code())),
            path: None,
            extensions: Some(extensions),
        }
    }
}

/// Unwrap the single-field object GraphQL wraps the real data in
///
/// The field name depends on the query, so the caller cannot address it
/// statically; what it can rely on is that there is exactly one field.
/// Anything else is a decoding error.
pub fn unwrap_root(data: &Value) -> Result<&Value, ResponseError> {
    match data {
        Value::Object(map) if map.len() == 1 => map
            .values()
            .next()
            .ok_or(ResponseError::AmbiguousRoot { field_count: 0 }),
        Value::Object(map) => Err(ResponseError::AmbiguousRoot {
            field_count: map.len(),
        }),
        _ => Err(ResponseError::Decode(
            "response data is not an object".to_string(),
        )),
    }
}

/// Find the first business error among a response's errors
///
/// Recognizes both conventions: the `BUSINESS:`-prefixed `errorType` with
/// the payload in `extensions`, and a bare `extensions.code`. Errors whose
/// code is not part of the known taxonomy are left for generic handling.
pub fn extract_business_error(errors: &[GraphQLResponseError]) -> Option<BusinessError> {
    errors.iter().find_map(decode_business_error)
}

fn decode_business_error(error: &GraphQLResponseError) -> Option<BusinessError> {
    let from_error_type = error
        .error_type
        .as_deref()
        .and_then(|error_type| error_type.strip_prefix(BUSINESS_ERROR_PREFIX));
    let from_extensions = error
        .extensions
        .as_ref()
        .and_then(|extensions| extensions.get("code"))
        .and_then(Value::as_str);
    let code = from_error_type.or(from_extensions)?;

    let mut payload = error.extensions.clone().unwrap_or_default();
    payload.insert("code".to_string(), Value::String(code.to_string()));
    serde_json::from_value(Value::Object(payload)).ok()
}
