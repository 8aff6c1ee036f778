//! Adapter between host hook versions and the moderation engine.
//!
//! Older hosts pass the previous hook result as a bare boolean, newer ones as
//! `{accepted, errorMessage?}`. Both collapse to one boolean on the way in, and the
//! structured form is always returned.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::Instrument;

use super::dto::{HookRequest, ModerationDecision};
use super::use_case::ModerationEngine;

/// Host hook points that deliver new comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookTarget {
    /// New local top-level comment.
    VideoThread,
    /// New local reply.
    VideoCommentReply,
    /// Comment received through federation.
    RemoteVideoComment,
}

impl HookTarget {
    pub const ALL: [HookTarget; 3] = [
        HookTarget::VideoThread,
        HookTarget::VideoCommentReply,
        HookTarget::RemoteVideoComment,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::VideoThread => "video-thread",
            Self::VideoCommentReply => "video-comment-reply",
            Self::RemoteVideoComment => "remote-video-comment",
        }
    }

    /// Hook name as registered with the host.
    pub fn host_name(&self) -> &'static str {
        match self {
            Self::VideoThread => "filter:api.video-thread.create.accept.result",
            Self::VideoCommentReply => "filter:api.video-comment-reply.create.accept.result",
            Self::RemoteVideoComment => {
                "filter:activity-pub.remote-video-comment.create.accept.result"
            }
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }
}

impl fmt::Display for HookTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

/// Unrecognized shapes fail open.
pub fn normalize_accepted(prior: &Value) -> bool {
    if let Some(accepted) = prior.get("accepted").and_then(Value::as_bool) {
        return accepted;
    }
    if let Some(accepted) = prior.as_bool() {
        return accepted;
    }
    tracing::warn!(prior = %prior, "unexpected prior hook result shape, defaulting to accepted");
    true
}

pub async fn run_accept_hook(
    engine: &ModerationEngine,
    target: HookTarget,
    request: &HookRequest,
) -> ModerationDecision {
    let prior_accepted = normalize_accepted(&request.result);
    tracing::debug!(%target, prior_accepted, "accept hook invoked");

    let decision = engine
        .decide(prior_accepted, &request.params)
        .instrument(tracing::info_span!("accept_hook", %target))
        .await;

    tracing::debug!(%target, accepted = decision.accepted, "accept hook result");
    decision
}
