//! Handler for call history replay.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::history::ReplayResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the recorded calls of an instrumented operation.
///
/// # Endpoint
///
/// `GET /history/{operation}`
///
/// # Response
///
/// ```json
/// {
///   "operation": "Cache.store",
///   "count": 1,
///   "calls": [
///     { "input": "(\"first\",)", "output": "1c6c5e0e-7a3f-4d7b-9a53-3f6b2b0c9e11" }
///   ]
/// }
/// ```
///
/// Unknown operations return an empty history.
pub async fn history_handler(
    State(state): State<AppState>,
    Path(operation): Path<String>,
) -> Result<Json<ReplayResponse>, AppError> {
    let replay = state.objects.replay(&operation).await?;

    Ok(Json(replay.into()))
}
