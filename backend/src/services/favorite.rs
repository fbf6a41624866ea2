use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::models::Favorite;
use crate::utils::{ApiError, ApiResult};

/// User identity assumed when the caller supplies none. There is no login
/// model; collaborators that do know the user pass an explicit id instead.
pub const DEFAULT_USER_ID: &str = "default";

/// CRUD over a user's favorited sentences, kept in explicit display order
pub struct FavoriteService {
    pool: SqlitePool,
}

impl FavoriteService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All favorites for a user, in display order
    pub async fn list(&self, user_id: &str) -> ApiResult<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, sentence, display_order, created_at
             FROM favorites WHERE user_id = ? ORDER BY display_order",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }

    /// Append a sentence to the end of a user's favorites
    pub async fn add(&self, user_id: &str, sentence: &str) -> ApiResult<Favorite> {
        let mut tx = self.pool.begin().await?;

        let next_order: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(display_order), 0) + 1 FROM favorites WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let result = sqlx::query(
            "INSERT INTO favorites (user_id, sentence, display_order) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(sentence)
        .bind(next_order)
        .execute(&mut *tx)
        .await?;
        let id = result.last_insert_rowid();

        let favorite = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, sentence, display_order, created_at FROM favorites WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("User '{}' favorited sentence #{}", user_id, id);
        Ok(favorite)
    }

    /// Delete one favorite owned by the user
    pub async fn delete(&self, user_id: &str, id: i64) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("favorite {}", id)));
        }

        Ok(())
    }

    /// Replace the display order of a user's whole favorites list.
    ///
    /// `ordered_ids` must contain every favorite id of the user exactly
    /// once; positions are assigned 1-based in the given order.
    pub async fn reorder(&self, user_id: &str, ordered_ids: &[i64]) -> ApiResult<()> {
        let current = self.list(user_id).await?;
        let existing: HashSet<i64> = current.iter().map(|f| f.id).collect();
        let requested: HashSet<i64> = ordered_ids.iter().copied().collect();

        if existing != requested || requested.len() != ordered_ids.len() {
            return Err(ApiError::validation_error(
                "ordered_ids must list every favorite of the user exactly once",
            ));
        }

        let mut tx = self.pool.begin().await?;
        for (position, id) in ordered_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE favorites SET display_order = ? WHERE id = ? AND user_id = ?",
            )
            .bind(position as i64 + 1)
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }
}
