use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::moderation::{blocked_comment::BlockedComment, video::ModerationVideo};

/// Host role id of the instance administrator.
pub const ROOT_ROLE: i32 = 0;

/// The authenticated reviewer a request acts for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerContext {
    pub user_id: i32,
    pub username: String,
    pub is_root: bool,
}

impl ReviewerContext {
    pub fn new(user_id: i32, username: impl Into<String>, role: i32) -> Self {
        Self {
            user_id,
            username: username.into(),
            is_root: role == ROOT_ROLE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BlockedCommentPage {
    pub data: Vec<BlockedComment>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub is_root_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApproveResponse {
    pub success: bool,
    pub comment: BlockedComment,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MyVideosResponse {
    pub videos: Vec<ModerationVideo>,
}
