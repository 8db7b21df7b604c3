use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

use crate::application::CacheError;
use crate::infrastructure::http::FetchError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Decode { message: String, details: Value },
    Fetch { message: String, details: Value },
    Unavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Decode { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "decode_error",
                message,
                details,
            ),
            AppError::Fetch { message, details } => {
                (StatusCode::BAD_GATEWAY, "fetch_error", message, details)
            }
            AppError::Unavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                message,
                details,
            ),
        };

        (status, code, message.as_str(), details)
    }

    /// Returns the HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, code, message, _) = self.parts();
        write!(f, "{}: {}", code, message)
    }
}

impl std::error::Error for AppError {}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        match e {
            CacheError::StoreUnavailable(inner) => {
                tracing::error!("Store error: {}", inner);
                AppError::Unavailable {
                    message: "Key-value store unavailable".to_string(),
                    details: json!({}),
                }
            }
            CacheError::DecodeFailure(inner) => AppError::Decode {
                message: "Stored value cannot be decoded as requested".to_string(),
                details: json!({ "reason": inner.to_string() }),
            },
            CacheError::FetchFailure(inner) => {
                let details = match &inner {
                    FetchError::Status { url, status } => {
                        json!({ "url": url, "upstream_status": status })
                    }
                    FetchError::Timeout { url } => json!({ "url": url, "reason": "timeout" }),
                    FetchError::Transport { url, message } => {
                        json!({ "url": url, "reason": message })
                    }
                };
                AppError::Fetch {
                    message: "Failed to fetch page".to_string(),
                    details,
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
