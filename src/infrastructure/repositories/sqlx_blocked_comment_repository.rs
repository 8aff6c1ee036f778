use crate::domain::{
    moderation::{
        blocked_comment::{BlockedComment, BlockedCommentFilter, NewBlockedComment},
        repository::BlockedCommentRepository,
    },
    shared::{errors::DomainError, pagination::PageRequest},
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

const SELECT_COLUMNS: &str = "SELECT id, text, video_id, video_uuid, user_id, user_username, \
     block_reason, score, hate_score, language, created_at, approved, approved_by, approved_at \
     FROM blocked_comments";

pub struct SqlxBlockedCommentRepository {
    pub pool: PgPool,
}

impl SqlxBlockedCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COUNT_QUERY: &str = "SELECT COUNT(*)::bigint FROM blocked_comments";

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &BlockedCommentFilter) {
    qb.push(" WHERE 1=1");
    if let Some(owner_video_ids) = &filter.owner_video_ids {
        qb.push(" AND video_id = ANY(")
            .push_bind(owner_video_ids.clone())
            .push(")");
    }
    if let Some(video_id) = filter.video_id {
        qb.push(" AND video_id = ").push_bind(video_id);
    }
    if let Some(block_reason) = filter.block_reason {
        qb.push(" AND block_reason = ").push_bind(block_reason.as_str());
    }
    if let Some(approved) = filter.approved {
        qb.push(" AND approved = ").push_bind(approved);
    }
}

/// Page query, newest first. Shares its WHERE clause with `count_query`.
fn list_query<'a>(
    filter: &BlockedCommentFilter,
    page: PageRequest,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset());
    qb
}

fn count_query<'a>(filter: &BlockedCommentFilter) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(COUNT_QUERY);
    push_filters(&mut qb, filter);
    qb
}

#[async_trait]
impl BlockedCommentRepository for SqlxBlockedCommentRepository {
    async fn insert(&self, comment: NewBlockedComment) -> Result<i32, DomainError> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO blocked_comments (
                text, video_id, video_uuid, user_id, user_username,
                block_reason, score, hate_score, language
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id",
        )
        .bind(&comment.text)
        .bind(comment.video_id)
        .bind(&comment.video_uuid)
        .bind(comment.user_id)
        .bind(&comment.user_username)
        .bind(comment.block_reason.as_str())
        .bind(comment.score)
        .bind(comment.hate_score)
        .bind(&comment.language)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list(
        &self,
        filter: &BlockedCommentFilter,
        page: PageRequest,
    ) -> Result<(Vec<BlockedComment>, i64), DomainError> {
        let mut items_qb = list_query(filter, page);
        let rows: Vec<BlockedComment> = items_qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        let mut count_qb = count_query(filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((rows, total))
    }

    async fn find_video_id(&self, id: i32) -> Result<Option<Option<i32>>, DomainError> {
        let video_id = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT video_id FROM blocked_comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(video_id)
    }

    async fn approve(
        &self,
        id: i32,
        approver_id: i32,
    ) -> Result<Option<BlockedComment>, DomainError> {
        let row = sqlx::query_as::<_, BlockedComment>(
            "UPDATE blocked_comments
             SET approved = true, approved_by = $1, approved_at = NOW()
             WHERE id = $2
             RETURNING id, text, video_id, video_uuid, user_id, user_username,
                       block_reason, score, hate_score, language, created_at,
                       approved, approved_by, approved_at",
        )
        .bind(approver_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM blocked_comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
