//! Preference handlers

use std::collections::BTreeMap;

use axum::{extract::State, Extension, Json};

use domain_profile::PreferenceValue;

use crate::auth::Principal;
use crate::dto::profile::PreferencesResponse;
use crate::error::ApiError;
use crate::handlers::require_principal;
use crate::AppState;

/// Returns the authenticated player's stored preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let principal = require_principal(principal)?;

    let preferences = state.service.get_preferences(principal.player_id).await?;

    Ok(Json(preferences.into()))
}

/// Merges an incoming preference mapping and returns the merged result
pub async fn update_preferences(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Json(incoming): Json<BTreeMap<String, PreferenceValue>>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let principal = require_principal(principal)?;

    let merged = state
        .service
        .update_preferences(principal.player_id, incoming)
        .await?;

    Ok(Json(merged.into()))
}

/// Returns the game-setup subset of the stored preferences
pub async fn get_game_preferences(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let principal = require_principal(principal)?;

    let game_preferences = state
        .service
        .get_game_preferences(principal.player_id)
        .await?;

    Ok(Json(game_preferences.into()))
}
