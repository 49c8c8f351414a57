use axum::{body::Bytes, extract::State, Extension, Json};
use cardboard_core::{CheckRequest, CheckResponse};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// `POST /api/check`: checks every game against every store.
///
/// The body is decoded by hand so a malformed payload gets the API's error
/// envelope with a 400, whatever the content type.
pub(super) async fn run_check(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<CheckResponse>, ApiError> {
    let request: CheckRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting check request");
        ApiError::new(req_id.0.clone(), "bad_request", "Invalid request body")
    })?;

    tracing::info!(
        request_id = %req_id.0,
        games = request.games.len(),
        "check requested"
    );

    Ok(Json(state.checker.run(&request.games).await))
}
