//! HTTP API Layer
//!
//! This crate provides the REST API for the player profile service using
//! Axum.
//!
//! # Architecture
//!
//! - **Token codec**: verifies signed bearer tokens and issues them for
//!   the token-issuing collaborator and tests
//! - **Authentication gate**: fail-open middleware that establishes a
//!   request-scoped principal from a verified token (or none)
//! - **Handlers**: profile lifecycle, preferences, wallet, event ingress
//! - **DTOs**: request/response data transfer objects
//! - **Error handling**: one stable caller-visible category per domain
//!   error kind
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, codec);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_profile::ProfileService;

use crate::auth::TokenCodec;
use crate::handlers::{events, health, preferences, profile, wallet};
use crate::middleware::{audit_middleware, authenticate};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ProfileService,
    pub codec: Arc<TokenCodec>,
}

/// Creates the main API router
///
/// User-initiated routes sit behind the authentication gate; event
/// ingress routes do not (events are not user-initiated), but flow into
/// the same domain service.
pub fn create_router(service: ProfileService, codec: Arc<TokenCodec>) -> Router {
    let state = AppState { service, codec };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Player profile routes
    let player_routes = Router::new()
        .route(
            "/profile",
            post(profile::create_profile)
                .get(profile::get_profile)
                .delete(profile::delete_profile),
        )
        .route(
            "/profile/preferences",
            get(preferences::get_preferences).put(preferences::update_preferences),
        )
        .route(
            "/profile/game-preferences",
            get(preferences::get_game_preferences),
        )
        .route(
            "/profile/wallet",
            get(wallet::get_wallet).patch(wallet::adjust_wallet),
        );

    // Gated API routes; the gate itself never rejects, it only resolves
    // the principal
    let api_routes = Router::new()
        .nest("/player", player_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ));

    // Event ingress routes bypass the gate
    let event_routes = Router::new()
        .route("/game-completed", post(events::game_completed))
        .route("/leaderboard-updated", post(events::leaderboard_updated));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .nest("/internal/events", event_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
