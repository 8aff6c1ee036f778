use serde::{Deserialize, Serialize};

pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// The classifier's scored assessment of one comment's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub allowed: bool,
    pub score: f64,
    pub hate_score: f64,
    pub requires_moderation: bool,
    pub language: String,
    /// True only when the upstream service explicitly asserted German.
    pub is_german: bool,
}

impl Verdict {
    /// Substituted whenever no real verdict can be obtained.
    pub fn fail_open() -> Self {
        Self {
            allowed: true,
            score: 0.0,
            hate_score: 0.0,
            requires_moderation: false,
            language: UNKNOWN_LANGUAGE.to_string(),
            is_german: false,
        }
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::fail_open()
    }
}
