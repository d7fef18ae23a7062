use serde_json::Value;
use sqlx::PgPool;
use crate::{common::error::AppError, models::settings::SystemConfig};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<SystemConfig>, AppError> {
        let configs = sqlx::query_as::<_, SystemConfig>("SELECT * FROM system_configs ORDER BY key ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(configs)
    }

    pub async fn get(&self, key: &str) -> Result<Option<SystemConfig>, AppError> {
        // Sem cache: cada leitura vai ao banco
        let config = sqlx::query_as::<_, SystemConfig>("SELECT * FROM system_configs WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(config)
    }

    pub async fn upsert(&self, key: &str, category: &str, value: &Value) -> Result<SystemConfig, AppError> {
        // UPSERT (Insert or Update)
        let config = sqlx::query_as::<_, SystemConfig>(
            r#"
            INSERT INTO system_configs (key, category, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (key)
            DO UPDATE SET
                category = EXCLUDED.category,
                value = EXCLUDED.value,
                updated_at = NOW()
            RETURNING *
            "#,
        )
            .bind(key)
            .bind(category)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;

        Ok(config)
    }
}
