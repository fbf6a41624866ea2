use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A favorited sentence with an explicit display position
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub sentence: String,
    /// Position in the user's favorites list, 1-based
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFavoriteRequest {
    #[validate(length(min = 1, max = 500))]
    pub sentence: String,
}

/// Full reorder of a user's favorites; must list every favorite id exactly once
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReorderFavoritesRequest {
    #[validate(length(min = 1))]
    pub ordered_ids: Vec<i64>,
}
