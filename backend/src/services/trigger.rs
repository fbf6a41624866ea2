use sqlx::SqlitePool;

use crate::utils::ApiResult;

/// Lookup of location triggers: opaque scanned payloads (currently QR codes)
/// mapped to a place category.
pub struct TriggerStore {
    pool: SqlitePool,
}

impl TriggerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Category registered for a scanned QR payload, if any
    pub async fn category_for_qr(&self, qr_value: &str) -> ApiResult<Option<String>> {
        let category = sqlx::query_scalar::<_, String>(
            "SELECT category FROM location_triggers WHERE trigger_type = 'QR' AND trigger_value = ?",
        )
        .bind(qr_value)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(name) = &category {
            tracing::debug!("QR payload '{}' resolved to category '{}'", qr_value, name);
        }

        Ok(category)
    }

    /// Register (or replace) the category for a QR payload
    pub async fn register_qr(&self, qr_value: &str, category: &str) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO location_triggers (trigger_type, trigger_value, category)
            VALUES ('QR', ?, ?)
            ON CONFLICT(trigger_value) DO UPDATE SET category = excluded.category
            "#,
        )
        .bind(qr_value)
        .bind(category)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
