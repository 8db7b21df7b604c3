//! Handlers for object storage endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::api::dto::objects::{
    GetObjectQuery, ObjectResponse, StoreRequest, StoreResponse, ValueFormat, encode_raw,
};
use crate::error::AppError;
use crate::state::AppState;

/// Stores a value under a new random key.
///
/// # Endpoint
///
/// `PUT /objects`
///
/// # Request Body
///
/// ```json
/// { "data": "first" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "key": "1c6c5e0e-7a3f-4d7b-9a53-3f6b2b0c9e11" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid bytes payload.
/// Returns 503 Service Unavailable if the store cannot be reached.
pub async fn store_object_handler(
    State(state): State<AppState>,
    Json(payload): Json<StoreRequest>,
) -> Result<(StatusCode, Json<StoreResponse>), AppError> {
    let value = payload.data.into_value()?;

    let key = state.objects.store(value).await?;

    Ok((StatusCode::CREATED, Json(StoreResponse { key })))
}

/// Reads a stored value, decoded as requested.
///
/// # Endpoint
///
/// `GET /objects/{key}?as=str|int|float|raw`
///
/// `raw` is the default and returns the bytes base64-encoded.
///
/// # Errors
///
/// Returns 404 Not Found if the key is absent.
/// Returns 422 Unprocessable Entity if the bytes cannot be decoded as requested.
pub async fn get_object_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<GetObjectQuery>,
) -> Result<Json<ObjectResponse>, AppError> {
    let objects = &state.objects;

    let value: Option<Value> = match query.format {
        ValueFormat::Str => objects.get_str(&key).await?.map(Value::String),
        ValueFormat::Int => objects.get_int(&key).await?.map(Value::from),
        ValueFormat::Float => objects.get_float(&key).await?.map(Value::from),
        ValueFormat::Raw => objects.get(&key).await?.map(|bytes| encode_raw(&bytes)),
    };

    let value = value.ok_or_else(|| AppError::not_found("Key not found", json!({ "key": key })))?;

    Ok(Json(ObjectResponse {
        key,
        format: query.format,
        value,
    }))
}
