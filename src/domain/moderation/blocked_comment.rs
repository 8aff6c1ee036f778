use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use super::submission::CommentSubmission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BlockReason {
    Toxic,
    NonGerman,
}

impl BlockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toxic => "toxic",
            Self::NonGerman => "non_german",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for BlockReason {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for BlockReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toxic" => Ok(Self::Toxic),
            "non_german" => Ok(Self::NonGerman),
            other => Err(format!("unknown block reason: {}", other)),
        }
    }
}

/// Persisted audit/queue row for a comment that did not pass moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BlockedComment {
    pub id: i32,
    pub text: String,
    pub video_id: Option<i32>,
    pub video_uuid: Option<String>,
    pub user_id: Option<i32>,
    pub user_username: Option<String>,
    #[sqlx(try_from = "String")]
    pub block_reason: BlockReason,
    pub score: Option<f64>,
    pub hate_score: Option<f64>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub approved: bool,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTime<Utc>>,
}

/// Insert payload; `id`, `created_at` and the approval columns are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlockedComment {
    pub text: String,
    pub video_id: Option<i32>,
    pub video_uuid: Option<String>,
    pub user_id: Option<i32>,
    pub user_username: Option<String>,
    pub block_reason: BlockReason,
    pub score: Option<f64>,
    pub hate_score: Option<f64>,
    pub language: Option<String>,
}

impl NewBlockedComment {
    pub fn toxic(
        text: &str,
        submission: &CommentSubmission,
        score: f64,
        hate_score: f64,
        language: &str,
    ) -> Self {
        Self::snapshot(
            text,
            submission,
            BlockReason::Toxic,
            Some(score),
            Some(hate_score),
            language,
        )
    }

    pub fn non_german(text: &str, submission: &CommentSubmission, language: &str) -> Self {
        Self::snapshot(text, submission, BlockReason::NonGerman, None, None, language)
    }

    fn snapshot(
        text: &str,
        submission: &CommentSubmission,
        block_reason: BlockReason,
        score: Option<f64>,
        hate_score: Option<f64>,
        language: &str,
    ) -> Self {
        Self {
            text: text.to_string(),
            video_id: submission.video.as_ref().and_then(|v| v.id),
            video_uuid: submission.video.as_ref().and_then(|v| v.uuid.clone()),
            user_id: submission.user.as_ref().and_then(|u| u.id),
            user_username: submission.user.as_ref().and_then(|u| u.username.clone()),
            block_reason,
            score,
            hate_score,
            language: Some(language.to_string()).filter(|l| !l.is_empty()),
        }
    }
}

/// Filters accepted by the review queue listing.
///
/// `owner_video_ids` restricts results to the caller's videos; `None` means unrestricted (root).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedCommentFilter {
    pub block_reason: Option<BlockReason>,
    pub approved: Option<bool>,
    pub video_id: Option<i32>,
    pub owner_video_ids: Option<Vec<i32>>,
}
