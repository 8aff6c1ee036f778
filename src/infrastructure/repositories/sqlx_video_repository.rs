//! Ownership lookups against the host platform's own tables.
//!
//! The host schema uses quoted camelCase identifiers; these tables are only ever read.

use crate::domain::{
    moderation::{repository::VideoRepository, video::ModerationVideo},
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct SqlxVideoRepository {
    pub pool: PgPool,
}

impl SqlxVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for SqlxVideoRepository {
    async fn owned_video_ids(&self, user_id: i32) -> Result<Vec<i32>, DomainError> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"SELECT id FROM "video"
               WHERE "channelId" IN (SELECT id FROM "videoChannel" WHERE "ownerId" = $1)"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn list_all(&self, limit: i64) -> Result<Vec<ModerationVideo>, DomainError> {
        let videos = sqlx::query_as::<_, ModerationVideo>(
            r#"SELECT id, uuid, name FROM "video" ORDER BY "createdAt" DESC LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(videos)
    }

    async fn list_by_ids(&self, ids: &[i32]) -> Result<Vec<ModerationVideo>, DomainError> {
        let videos = sqlx::query_as::<_, ModerationVideo>(
            r#"SELECT id, uuid, name FROM "video" WHERE id = ANY($1) ORDER BY "createdAt" DESC"#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(videos)
    }
}
