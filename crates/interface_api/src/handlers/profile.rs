//! Profile lifecycle handlers
//!
//! Every operation acts on the profile of the authenticated principal -
//! never on a client-supplied identity - so a caller cannot act on
//! another player's record.

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::auth::Principal;
use crate::dto::profile::{MessageResponse, ProfileResponse};
use crate::error::ApiError;
use crate::handlers::require_principal;
use crate::AppState;

/// Creates a profile for the authenticated player
pub async fn create_profile(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let principal = require_principal(principal)?;

    state.service.create_profile(principal.player_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Profile created successfully")),
    ))
}

/// Returns the authenticated player's profile snapshot
pub async fn get_profile(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let principal = require_principal(principal)?;

    let profile = state.service.get_profile(principal.player_id).await?;

    Ok(Json(profile.into()))
}

/// Permanently deletes the authenticated player's profile
pub async fn delete_profile(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let principal = require_principal(principal)?;

    state.service.delete_profile(principal.player_id).await?;

    Ok(Json(MessageResponse::new("Profile deleted successfully")))
}
