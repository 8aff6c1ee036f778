use std::sync::Arc;

use super::dto::{BlockedCommentPage, ReviewerContext};
use crate::domain::moderation::{
    blocked_comment::{BlockedComment, BlockedCommentFilter},
    repository::{BlockedCommentRepository, VideoRepository},
    video::ModerationVideo,
};
use crate::domain::shared::{errors::DomainError, pagination::PageRequest};

/// Upper bound of the root video listing.
pub const ROOT_VIDEO_LIMIT: i64 = 1000;

/// Review queue operations, scoped to the videos a reviewer owns unless they are root.
#[derive(Clone)]
pub struct ReviewService {
    blocked_comments: Arc<dyn BlockedCommentRepository>,
    videos: Arc<dyn VideoRepository>,
}

impl ReviewService {
    pub fn new(
        blocked_comments: Arc<dyn BlockedCommentRepository>,
        videos: Arc<dyn VideoRepository>,
    ) -> Self {
        Self {
            blocked_comments,
            videos,
        }
    }

    pub async fn list(
        &self,
        reviewer: &ReviewerContext,
        mut filter: BlockedCommentFilter,
        page: PageRequest,
    ) -> Result<BlockedCommentPage, DomainError> {
        if !reviewer.is_root {
            let owned = self.videos.owned_video_ids(reviewer.user_id).await?;
            if owned.is_empty() {
                return Ok(BlockedCommentPage {
                    data: Vec::new(),
                    total: 0,
                    page: page.page,
                    limit: page.limit,
                    is_root_admin: false,
                });
            }
            filter.owner_video_ids = Some(owned);
        }

        let (data, total) = self.blocked_comments.list(&filter, page).await?;

        Ok(BlockedCommentPage {
            data,
            total,
            page: page.page,
            limit: page.limit,
            is_root_admin: reviewer.is_root,
        })
    }

    pub async fn approve(
        &self,
        reviewer: &ReviewerContext,
        id: i32,
    ) -> Result<BlockedComment, DomainError> {
        self.authorize(reviewer, id).await?;

        let comment = self
            .blocked_comments
            .approve(id, reviewer.user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Blocked comment {} not found", id)))?;

        tracing::info!(id, reviewer = %reviewer.username, "blocked comment approved");
        Ok(comment)
    }

    pub async fn delete(&self, reviewer: &ReviewerContext, id: i32) -> Result<(), DomainError> {
        self.authorize(reviewer, id).await?;

        if !self.blocked_comments.delete(id).await? {
            return Err(DomainError::NotFound(format!(
                "Blocked comment {} not found",
                id
            )));
        }

        tracing::info!(id, reviewer = %reviewer.username, "blocked comment deleted");
        Ok(())
    }

    pub async fn my_videos(
        &self,
        reviewer: &ReviewerContext,
    ) -> Result<Vec<ModerationVideo>, DomainError> {
        if reviewer.is_root {
            return self.videos.list_all(ROOT_VIDEO_LIMIT).await;
        }

        let owned = self.videos.owned_video_ids(reviewer.user_id).await?;
        if owned.is_empty() {
            return Ok(Vec::new());
        }
        self.videos.list_by_ids(&owned).await
    }

    /// Root may act on any record; everyone else only on records of videos they own.
    async fn authorize(&self, reviewer: &ReviewerContext, id: i32) -> Result<(), DomainError> {
        let video_id = self
            .blocked_comments
            .find_video_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Blocked comment {} not found", id)))?;

        if reviewer.is_root {
            return Ok(());
        }

        let owned = self.videos.owned_video_ids(reviewer.user_id).await?;
        match video_id {
            Some(video_id) if owned.contains(&video_id) => Ok(()),
            _ => {
                tracing::warn!(id, reviewer = %reviewer.username, "reviewer does not own the comment's video");
                Err(DomainError::Forbidden(
                    "You can only manage comments on your own videos".to_string(),
                ))
            }
        }
    }
}
