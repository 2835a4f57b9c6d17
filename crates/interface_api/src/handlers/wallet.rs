//! Wallet handlers

use axum::{extract::State, Extension, Json};

use crate::auth::Principal;
use crate::dto::profile::{AdjustWalletRequest, WalletResponse};
use crate::error::ApiError;
use crate::handlers::require_principal;
use crate::AppState;

/// Returns the authenticated player's wallet balance
pub async fn get_wallet(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> Result<Json<WalletResponse>, ApiError> {
    let principal = require_principal(principal)?;

    let balance = state.service.get_wallet(principal.player_id).await?;

    Ok(Json(WalletResponse {
        balance,
        change_amount: None,
    }))
}

/// Applies a signed adjustment to the wallet, rejected in full if the
/// balance would go negative
pub async fn adjust_wallet(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Json(request): Json<AdjustWalletRequest>,
) -> Result<Json<WalletResponse>, ApiError> {
    let principal = require_principal(principal)?;

    let balance = state
        .service
        .adjust_wallet(principal.player_id, request.change_amount)
        .await?;

    Ok(Json(WalletResponse {
        balance,
        change_amount: Some(request.change_amount),
    }))
}
