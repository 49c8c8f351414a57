use axum::{body::Bytes, extract::State, Extension, Json};
use cardboard_core::Game;
use serde::Serialize;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct SaveStatus {
    status: &'static str,
}

/// `GET /api/games`: the saved wishlist, `[]` when none has been saved.
pub(super) async fn list_games(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<Game>>, ApiError> {
    state.wishlist.load().await.map(Json).map_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "loading wishlist failed");
        ApiError::new(req_id.0, "internal_error", "failed to load wishlist")
    })
}

/// `POST /api/games`: replaces the saved wishlist with the posted array.
pub(super) async fn save_games(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<SaveStatus>, ApiError> {
    let games: Vec<Game> = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting wishlist body");
        ApiError::new(req_id.0.clone(), "bad_request", "Invalid request body")
    })?;

    state.wishlist.save(&games).await.map_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "saving wishlist failed");
        ApiError::new(req_id.0, "internal_error", "failed to save wishlist")
    })?;

    Ok(Json(SaveStatus { status: "success" }))
}
