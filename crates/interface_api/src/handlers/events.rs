//! Event ingress handlers
//!
//! Inbound domain events are not user-initiated, so these routes bypass
//! the authentication gate and resolve the target profile from the event
//! payload. The message-bus transport itself is an external collaborator;
//! delivery lands here and flows straight into the domain service, which
//! applies the same invariants as the user-facing operations.

use axum::{extract::State, http::StatusCode, Json};

use domain_profile::{GameCompletedEvent, LeaderboardUpdatedEvent};

use crate::error::ApiError;
use crate::AppState;

/// Applies a game-completed event to the player's statistics
pub async fn game_completed(
    State(state): State<AppState>,
    Json(event): Json<GameCompletedEvent>,
) -> Result<StatusCode, ApiError> {
    state.service.handle_game_completed(event).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Applies a leaderboard-updated event to the player's position
pub async fn leaderboard_updated(
    State(state): State<AppState>,
    Json(event): Json<LeaderboardUpdatedEvent>,
) -> Result<StatusCode, ApiError> {
    state.service.handle_leaderboard_updated(event).await?;
    Ok(StatusCode::NO_CONTENT)
}
