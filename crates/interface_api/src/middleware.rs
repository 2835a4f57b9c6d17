//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::Principal;
use crate::AppState;

/// Authentication gate
///
/// Runs once per inbound user-initiated call. The gate never rejects a
/// request: it only decides whether an authenticated [`Principal`] exists.
/// A missing or failed credential leaves the request anonymous and the
/// downstream operation decides whether anonymous access is permitted.
/// The principal lives in this request's extensions only - every call
/// reconstructs it fresh from its own credential.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match bearer {
        Some(token) => token,
        // no bearer credential: pass through anonymous
        None => return next.run(request).await,
    };

    match state.codec.verify(token) {
        Ok(claims) => match claims.principal() {
            Ok(principal) => {
                request.extensions_mut().insert(principal);
            }
            Err(err) => {
                warn!(error = %err, "Verified token carries unusable identity claims");
            }
        },
        Err(err) => {
            warn!(error = %err, "Token verification failed");
        }
    }

    next.run(request).await
}

/// Request logging middleware
///
/// Logs every API request with the resolved principal (or "anonymous")
/// for audit and debugging.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let player = request
        .extensions()
        .get::<Principal>()
        .map(|p| p.player_id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        player = %player,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
