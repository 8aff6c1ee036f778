use serde_json::Value;
use std::sync::Arc;

use super::dto::ModerationDecision;
use crate::domain::moderation::{
    blocked_comment::NewBlockedComment,
    repository::BlockedCommentRepository,
    settings::{NonGermanAction, SettingsProvider},
    submission::CommentSubmission,
};
use crate::infrastructure::{
    classifier::traits::CommentClassifier,
    security::{
        comment_moderator::{
            CommentAssessment, PRIOR_REJECTION_MESSAGE, assess_verdict, needs_language_review,
        },
        text_extractor::{extract_text, preview},
    },
};

/// Turns one incoming comment into an accept/reject decision.
///
/// Rejected comments are written to the review queue on a best-effort basis: a failed
/// write is logged and never changes the decision.
#[derive(Clone)]
pub struct ModerationEngine {
    classifier: Arc<dyn CommentClassifier>,
    blocked_comments: Arc<dyn BlockedCommentRepository>,
    settings: SettingsProvider,
}

impl ModerationEngine {
    pub fn new(
        classifier: Arc<dyn CommentClassifier>,
        blocked_comments: Arc<dyn BlockedCommentRepository>,
        settings: SettingsProvider,
    ) -> Self {
        Self {
            classifier,
            blocked_comments,
            settings,
        }
    }

    pub async fn decide(&self, prior_accepted: bool, payload: &Value) -> ModerationDecision {
        if !prior_accepted {
            tracing::info!("comment already rejected by an earlier moderation stage");
            return ModerationDecision::rejected(PRIOR_REJECTION_MESSAGE);
        }

        let text = extract_text(payload);
        tracing::debug!(text = %preview(&text, 100), length = text.len(), "extracted comment text");

        let verdict = self.classifier.classify(&text).await;

        let action = if needs_language_review(&verdict, &text) {
            self.settings.non_german_action().await
        } else {
            NonGermanAction::default()
        };

        let assessment = assess_verdict(&verdict, &text, action);
        let submission = CommentSubmission::from_payload(payload);

        match &assessment {
            CommentAssessment::Accept => {
                tracing::debug!("comment allowed");
                return ModerationDecision::accepted();
            }
            CommentAssessment::RejectNonGerman { action, language } => {
                tracing::info!(
                    %action,
                    %language,
                    text = %preview(&text, 50),
                    "non-German comment rejected"
                );
                self.save_blocked_comment(NewBlockedComment::non_german(
                    &text,
                    &submission,
                    language,
                ))
                .await;
            }
            CommentAssessment::RejectToxic {
                score,
                hate_score,
                language,
            } => {
                tracing::info!(
                    score = *score,
                    hate_score = *hate_score,
                    %language,
                    text = %preview(&text, 50),
                    "toxic comment rejected"
                );
                self.save_blocked_comment(NewBlockedComment::toxic(
                    &text,
                    &submission,
                    *score,
                    *hate_score,
                    language,
                ))
                .await;
            }
        }

        ModerationDecision {
            accepted: false,
            error_message: assessment.message(),
        }
    }

    async fn save_blocked_comment(&self, record: NewBlockedComment) -> Option<i32> {
        let reason = record.block_reason;
        match self.blocked_comments.insert(record).await {
            Ok(id) => {
                tracing::info!(id, %reason, "blocked comment saved");
                Some(id)
            }
            Err(err) => {
                tracing::error!(error = %err, %reason, "failed to save blocked comment");
                None
            }
        }
    }
}
