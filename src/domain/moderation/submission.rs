use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoRef {
    pub id: Option<i32>,
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRef {
    pub id: Option<i32>,
    pub username: Option<String>,
}

/// The parts of a host comment payload that are snapshotted into a blocked record.
///
/// The comment text itself is pulled separately by the text extractor since its
/// location varies across host API versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentSubmission {
    pub video: Option<VideoRef>,
    pub user: Option<UserRef>,
}

impl CommentSubmission {
    pub fn from_payload(payload: &Value) -> Self {
        let video = payload.get("video").filter(|v| v.is_object()).map(|v| VideoRef {
            id: positive_id(v.get("id")),
            uuid: non_empty_string(v.get("uuid")),
        });
        let user = payload.get("user").filter(|u| u.is_object()).map(|u| UserRef {
            id: positive_id(u.get("id")),
            username: non_empty_string(u.get("username")),
        });
        Self { video, user }
    }
}

// Zero and absent ids are treated alike, the host never issues id 0.
fn positive_id(value: Option<&Value>) -> Option<i32> {
    value
        .and_then(Value::as_i64)
        .filter(|id| *id != 0)
        .and_then(|id| i32::try_from(id).ok())
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
