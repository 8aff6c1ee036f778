use aimod::application::moderate_comment::{dto::ModerationDecision, host_protocol::HookTarget};
use aimod::domain::{
    moderation::{
        blocked_comment::{BlockReason, NewBlockedComment},
        submission::CommentSubmission,
        verdict::Verdict,
    },
    shared::pagination::PageRequest,
};
use aimod::infrastructure::classifier::ai_classifier::decode_verdict;
use serde_json::json;

#[test]
fn pagination_defaults_are_safe_and_stable() {
    let p = PageRequest::default();
    assert_eq!(p.page, 1);
    assert_eq!(p.limit, 50);
    assert_eq!(p.offset(), 0);
    assert_eq!(PageRequest::new(3, 20).offset(), 40);
}

#[test]
fn block_reason_parses_only_known_values() {
    assert_eq!("toxic".parse::<BlockReason>().ok(), Some(BlockReason::Toxic));
    assert_eq!(
        "non_german".parse::<BlockReason>().ok(),
        Some(BlockReason::NonGerman)
    );
    assert!("spam".parse::<BlockReason>().is_err());
}

#[test]
fn blocked_record_snapshots_payload_context() {
    let submission = CommentSubmission::from_payload(&json!({
        "video": { "id": 4, "uuid": "abc" },
        "user": { "id": 0, "username": "" }
    }));
    let record = NewBlockedComment::toxic("Du Idiot", &submission, 0.9, 0.0, "de");

    assert_eq!(record.video_id, Some(4));
    assert_eq!(record.video_uuid.as_deref(), Some("abc"));
    assert_eq!(record.user_id, None);
    assert_eq!(record.user_username, None);
    assert_eq!(record.hate_score, Some(0.0));

    let record = NewBlockedComment::non_german("hi", &CommentSubmission::default(), "");
    assert_eq!(record.block_reason, BlockReason::NonGerman);
    assert_eq!(record.language, None);
    assert_eq!(record.score, None);
}

#[test]
fn fail_open_verdict_allows_everything() {
    let verdict = Verdict::fail_open();
    assert!(verdict.allowed);
    assert!(!verdict.requires_moderation);
    assert!(!verdict.is_german);
    assert_eq!(verdict.score, 0.0);
}

#[test]
fn missing_response_fields_default_to_benign() {
    let verdict = decode_verdict(&json!({}), 0.7, 0.5).expect("object body decodes");
    assert!(verdict.allowed);
    assert!(!verdict.requires_moderation);
    assert!(!verdict.is_german);

    assert!(decode_verdict(&json!("ok"), 0.7, 0.5).is_none());
}

#[test]
fn decision_serializes_without_empty_message() {
    let accepted = serde_json::to_value(ModerationDecision::accepted()).unwrap();
    assert_eq!(accepted, json!({ "accepted": true }));

    let rejected = serde_json::to_value(ModerationDecision::rejected("nein")).unwrap();
    assert_eq!(rejected, json!({ "accepted": false, "errorMessage": "nein" }));
}

#[test]
fn hook_targets_map_to_host_names() {
    assert_eq!(
        HookTarget::RemoteVideoComment.host_name(),
        "filter:activity-pub.remote-video-comment.create.accept.result"
    );
    assert_eq!(
        HookTarget::from_slug("video-comment-reply"),
        Some(HookTarget::VideoCommentReply)
    );
}
