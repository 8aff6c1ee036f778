use super::blocked_comment::{BlockedComment, BlockedCommentFilter, NewBlockedComment};
use super::video::ModerationVideo;
use crate::domain::shared::{errors::DomainError, pagination::PageRequest};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlockedCommentRepository: Send + Sync {
    async fn insert(&self, comment: NewBlockedComment) -> Result<i32, DomainError>;
    async fn list(
        &self,
        filter: &BlockedCommentFilter,
        page: PageRequest,
    ) -> Result<(Vec<BlockedComment>, i64), DomainError>;
    /// `None` when the record does not exist, `Some(None)` when it has no video.
    async fn find_video_id(&self, id: i32) -> Result<Option<Option<i32>>, DomainError>;
    async fn approve(
        &self,
        id: i32,
        approver_id: i32,
    ) -> Result<Option<BlockedComment>, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

/// Read access to the host's video/channel ownership data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn owned_video_ids(&self, user_id: i32) -> Result<Vec<i32>, DomainError>;
    async fn list_all(&self, limit: i64) -> Result<Vec<ModerationVideo>, DomainError>;
    async fn list_by_ids(&self, ids: &[i32]) -> Result<Vec<ModerationVideo>, DomainError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<String>, DomainError>;
    async fn set(&self, name: &str, value: &str) -> Result<(), DomainError>;
    async fn insert_default(&self, name: &str, value: &str) -> Result<(), DomainError>;
}
