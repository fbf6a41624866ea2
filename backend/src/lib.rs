//! Talky backend
//!
//! Sentence-recommendation service for AAC (augmentative and alternative
//! communication) users: resolves a place/situation category from the
//! caller's signals, asks a generative-AI provider for candidate
//! next-utterances constrained to JSON, and returns them in generation
//! order. Favorites and QR location triggers are kept in SQLite.

pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::{FavoriteService, RecommendationService};

/// Shared application state handed to every handler
pub struct AppState {
    pub config: Config,
    pub recommendation_service: RecommendationService,
    pub favorite_service: FavoriteService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::recommendation::recommend,
        handlers::favorite::list_favorites,
        handlers::favorite::create_favorite,
        handlers::favorite::delete_favorite,
        handlers::favorite::reorder_favorites,
    ),
    components(schemas(
        models::RecommendationRequest,
        models::RecommendationResponse,
        models::ConversationTurn,
        models::Sentence,
        models::Favorite,
        models::CreateFavoriteRequest,
        models::ReorderFavoritesRequest,
    )),
    tags(
        (name = "Recommendations", description = "Context-aware sentence recommendation"),
        (name = "Favorites", description = "Favorited sentences, user-ordered"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Build the HTTP router over the shared state
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/recommendations", post(handlers::recommendation::recommend))
        .route(
            "/api/favorites",
            get(handlers::favorite::list_favorites).post(handlers::favorite::create_favorite),
        )
        .route("/api/favorites/order", put(handlers::favorite::reorder_favorites))
        .route("/api/favorites/:id", delete(handlers::favorite::delete_favorite))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
