use serde::{Deserialize, Serialize};

use crate::domain::moderation::{
    blocked_comment::BlockReason, settings::NonGermanAction, verdict::Verdict,
};

pub const PRIOR_REJECTION_MESSAGE: &str = "Comment has been rejected by another moderation rule.";
pub const MANUAL_REVIEW_MESSAGE: &str = "Kommentar wurde zur manuellen Überprüfung gesendet.";
pub const INSULT_MESSAGE: &str = "Kommentar abgelehnt: Der Kommentar enthält beleidigende Inhalte.";
pub const HATE_SPEECH_MESSAGE: &str =
    "Kommentar abgelehnt: Der Kommentar enthält beleidigende Inhalte und Hassrede.";
/// Shown below both tiers. Currently worded like the insult message.
pub const GENERIC_REJECTION_MESSAGE: &str =
    "Kommentar abgelehnt: Der Kommentar enthält beleidigende Inhalte.";

// Message tiers. Presentation only, independent of the operator thresholds that decide
// acceptance.
const HATE_MESSAGE_TIER: f64 = 0.5;
const INSULT_MESSAGE_TIER: f64 = 0.7;

/// Outcome of applying moderation policy to one verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommentAssessment {
    Accept,
    RejectNonGerman {
        action: NonGermanAction,
        language: String,
    },
    RejectToxic {
        score: f64,
        hate_score: f64,
        language: String,
    },
}

impl CommentAssessment {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }

    pub fn block_reason(&self) -> Option<BlockReason> {
        match self {
            Self::Accept => None,
            Self::RejectNonGerman { .. } => Some(BlockReason::NonGerman),
            Self::RejectToxic { .. } => Some(BlockReason::Toxic),
        }
    }

    /// User-facing rejection message.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Accept => None,
            Self::RejectNonGerman {
                action: NonGermanAction::Block,
                language,
            } => Some(format!(
                "Kommentar abgelehnt: Kommentare in der Sprache \"{}\" sind nicht erlaubt. Nur Kommentare auf Deutsch sind erlaubt.",
                language
            )),
            Self::RejectNonGerman {
                action: NonGermanAction::Moderate,
                ..
            } => Some(MANUAL_REVIEW_MESSAGE.to_string()),
            Self::RejectToxic {
                score, hate_score, ..
            } => Some(toxic_message(*score, *hate_score).to_string()),
        }
    }
}

fn toxic_message(score: f64, hate_score: f64) -> &'static str {
    if hate_score >= HATE_MESSAGE_TIER {
        HATE_SPEECH_MESSAGE
    } else if score >= INSULT_MESSAGE_TIER {
        INSULT_MESSAGE
    } else {
        GENERIC_REJECTION_MESSAGE
    }
}

/// The language policy applies only to non-empty text the service positively flagged
/// for moderation without confirming German. Fail-open verdicts never qualify.
pub fn needs_language_review(verdict: &Verdict, text: &str) -> bool {
    !verdict.is_german && verdict.requires_moderation && !text.trim().is_empty()
}

pub fn assess_verdict(
    verdict: &Verdict,
    text: &str,
    non_german_action: NonGermanAction,
) -> CommentAssessment {
    if needs_language_review(verdict, text) {
        return CommentAssessment::RejectNonGerman {
            action: non_german_action,
            language: verdict.language.clone(),
        };
    }

    if !verdict.allowed {
        return CommentAssessment::RejectToxic {
            score: verdict.score,
            hate_score: verdict.hate_score,
            language: verdict.language.clone(),
        };
    }

    CommentAssessment::Accept
}
