use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Structured hook result understood by current hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ModerationDecision {
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ModerationDecision {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            error_message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            accepted: false,
            error_message: Some(message.into()),
        }
    }
}

/// Body the host posts to a hook endpoint: the previous hook result and the comment payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookRequest {
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub params: Value,
}
