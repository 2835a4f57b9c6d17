//! Request handlers

pub mod events;
pub mod health;
pub mod preferences;
pub mod profile;
pub mod wallet;

use axum::Extension;

use crate::auth::Principal;
use crate::error::ApiError;

/// Resolves the request's authenticated principal
///
/// The gate is fail-open, so an operation that needs an identity and
/// finds no principal rejects the call itself.
pub(crate) fn require_principal(
    principal: Option<Extension<Principal>>,
) -> Result<Principal, ApiError> {
    principal
        .map(|Extension(principal)| principal)
        .ok_or(ApiError::Unauthorized)
}
