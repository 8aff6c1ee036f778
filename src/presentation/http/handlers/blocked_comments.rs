use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::application::review_comments::dto::{
    ApproveResponse, BlockedCommentPage, DeleteResponse, MyVideosResponse, ReviewerContext,
};
use crate::domain::moderation::blocked_comment::{BlockReason, BlockedCommentFilter};
use crate::domain::shared::pagination::{DEFAULT_PAGE_LIMIT, PageRequest};
use crate::presentation::http::{errors::AppError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedCommentsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub block_reason: Option<String>,
    pub approved: Option<String>,
    pub video_id: Option<i32>,
}

impl BlockedCommentsQuery {
    fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        )
    }

    fn filter(&self) -> Result<BlockedCommentFilter, AppError> {
        let block_reason = self
            .block_reason
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<BlockReason>()
                    .map_err(|_| AppError::BadRequest(format!("Unknown blockReason: {}", s)))
            })
            .transpose()?;

        Ok(BlockedCommentFilter {
            block_reason,
            approved: self.approved.as_deref().map(|s| s == "true"),
            video_id: self.video_id,
            owner_video_ids: None,
        })
    }
}

pub async fn list_blocked_comments(
    State(state): State<AppState>,
    Extension(reviewer): Extension<ReviewerContext>,
    Query(params): Query<BlockedCommentsQuery>,
) -> Result<Json<BlockedCommentPage>, AppError> {
    let filter = params.filter()?;
    let page = state
        .reviews
        .list(&reviewer, filter, params.page_request())
        .await?;
    Ok(Json(page))
}

pub async fn approve_blocked_comment(
    State(state): State<AppState>,
    Extension(reviewer): Extension<ReviewerContext>,
    Path(id): Path<i32>,
) -> Result<Json<ApproveResponse>, AppError> {
    let comment = state.reviews.approve(&reviewer, id).await?;
    Ok(Json(ApproveResponse {
        success: true,
        comment,
    }))
}

pub async fn delete_blocked_comment(
    State(state): State<AppState>,
    Extension(reviewer): Extension<ReviewerContext>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.reviews.delete(&reviewer, id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

pub async fn list_my_videos(
    State(state): State<AppState>,
    Extension(reviewer): Extension<ReviewerContext>,
) -> Result<Json<MyVideosResponse>, AppError> {
    let videos = state.reviews.my_videos(&reviewer).await?;
    Ok(Json(MyVideosResponse { videos }))
}
