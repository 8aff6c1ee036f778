use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A host video as offered to reviewers for queue filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct ModerationVideo {
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
}
