use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::AppState;
use crate::models::{CreateFavoriteRequest, Favorite, ReorderFavoritesRequest};
use crate::services::DEFAULT_USER_ID;
use crate::utils::{ApiError, ApiResult};

/// Optional user identity; defaults to the single implicit user when absent
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

impl UserQuery {
    fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(DEFAULT_USER_ID)
    }
}

/// List the user's favorites in display order
#[utoipa::path(
    get,
    path = "/api/favorites",
    params(
        ("user_id" = Option<String>, Query, description = "User identity (optional)")
    ),
    responses(
        (status = 200, description = "Favorites in display order", body = Vec<Favorite>)
    ),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
) -> ApiResult<Json<Vec<Favorite>>> {
    let favorites = state.favorite_service.list(user.user_id()).await?;
    Ok(Json(favorites))
}

/// Favorite a sentence (appended at the end of the list)
#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = CreateFavoriteRequest,
    params(
        ("user_id" = Option<String>, Query, description = "User identity (optional)")
    ),
    responses(
        (status = 201, description = "Created favorite", body = Favorite),
        (status = 400, description = "Empty or oversized sentence")
    ),
    tag = "Favorites"
)]
pub async fn create_favorite(
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
    Json(request): Json<CreateFavoriteRequest>,
) -> ApiResult<impl IntoResponse> {
    request.validate().map_err(|e| ApiError::validation_error(e.to_string()))?;

    let favorite = state.favorite_service.add(user.user_id(), &request.sentence).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Remove a favorite by id
#[utoipa::path(
    delete,
    path = "/api/favorites/{id}",
    params(
        ("id" = i64, Path, description = "Favorite id"),
        ("user_id" = Option<String>, Query, description = "User identity (optional)")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such favorite for this user")
    ),
    tag = "Favorites"
)]
pub async fn delete_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(user): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    state.favorite_service.delete(user.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the display order of the whole favorites list
#[utoipa::path(
    put,
    path = "/api/favorites/order",
    request_body = ReorderFavoritesRequest,
    params(
        ("user_id" = Option<String>, Query, description = "User identity (optional)")
    ),
    responses(
        (status = 204, description = "Order saved"),
        (status = 400, description = "ordered_ids does not match the user's favorites")
    ),
    tag = "Favorites"
)]
pub async fn reorder_favorites(
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
    Json(request): Json<ReorderFavoritesRequest>,
) -> ApiResult<impl IntoResponse> {
    request.validate().map_err(|e| ApiError::validation_error(e.to_string()))?;

    state.favorite_service.reorder(user.user_id(), &request.ordered_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
