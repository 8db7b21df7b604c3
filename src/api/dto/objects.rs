//! DTOs for the object storage endpoints.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::entities::StoredValue;
use crate::error::AppError;

/// Request body for `PUT /objects`.
///
/// ```json
/// { "data": "text" }
/// { "data": 42 }
/// { "data": 1.5 }
/// { "data": { "bytes": "AAEC" } }
/// ```
#[derive(Debug, Deserialize)]
pub struct StoreRequest {
    pub data: DataPayload,
}

/// A value to store. JSON integers map to integers, other numbers to floats,
/// strings to text, and `{"bytes": <base64>}` to a binary blob.
///
/// Uses untagged enum so plain JSON scalars can be sent as-is.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DataPayload {
    Int(i64),
    Float(f64),
    Text(String),
    Bytes { bytes: String },
}

impl DataPayload {
    /// Converts the payload into a [`StoredValue`], decoding base64 blobs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `bytes` is not valid base64.
    pub fn into_value(self) -> Result<StoredValue, AppError> {
        match self {
            Self::Int(n) => Ok(StoredValue::Int(n)),
            Self::Float(x) => Ok(StoredValue::Float(x)),
            Self::Text(text) => Ok(StoredValue::Text(text)),
            Self::Bytes { bytes } => STANDARD
                .decode(bytes.as_bytes())
                .map(StoredValue::Bytes)
                .map_err(|e| {
                    AppError::bad_request(
                        "Invalid base64 in bytes payload",
                        json!({ "reason": e.to_string() }),
                    )
                }),
        }
    }
}

/// Response for `PUT /objects`.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub key: String,
}

/// How `GET /objects/{key}` decodes the stored bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Str,
    Int,
    Float,
    #[default]
    Raw,
}

/// Query parameters for `GET /objects/{key}`.
#[derive(Debug, Deserialize)]
pub struct GetObjectQuery {
    #[serde(rename = "as", default)]
    pub format: ValueFormat,
}

/// Response for `GET /objects/{key}`.
///
/// `value` is a JSON string for `str`, a number for `int`/`float`, and a
/// base64 string for `raw`.
#[derive(Debug, Serialize)]
pub struct ObjectResponse {
    pub key: String,
    #[serde(rename = "as")]
    pub format: ValueFormat,
    pub value: Value,
}

/// Encodes raw bytes for a `raw` response.
pub fn encode_raw(bytes: &[u8]) -> Value {
    Value::String(STANDARD.encode(bytes))
}
