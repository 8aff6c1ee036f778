use crate::domain::{moderation::repository::SettingsRepository, shared::errors::DomainError};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct SqlxSettingsRepository {
    pub pool: PgPool,
}

impl SqlxSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for SqlxSettingsRepository {
    async fn get(&self, name: &str) -> Result<Option<String>, DomainError> {
        let value =
            sqlx::query_scalar::<_, String>("SELECT value FROM moderation_settings WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO moderation_settings (name, value) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE
             SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(name)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_default(&self, name: &str, value: &str) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO moderation_settings (name, value) VALUES ($1, $2)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
