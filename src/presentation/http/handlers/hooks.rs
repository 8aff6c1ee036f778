use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};

use crate::application::moderate_comment::{
    dto::{HookRequest, ModerationDecision},
    host_protocol::{HookTarget, run_accept_hook},
};
use crate::presentation::http::{errors::AppError, state::AppState};

/// Reads a hook body leniently. A body that is not a JSON object of the expected
/// shape becomes an empty request, which the engine treats as accepted.
pub fn parse_hook_body(body: &[u8]) -> HookRequest {
    match serde_json::from_slice::<Option<HookRequest>>(body) {
        Ok(request) => request.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "unreadable hook body, treating as empty");
            HookRequest::default()
        }
    }
}

/// Accept hook for new comments. Classifier and store failures never surface here;
/// only an unknown hook target is an error.
pub async fn accept_comment(
    State(state): State<AppState>,
    Path(target): Path<String>,
    body: Bytes,
) -> Result<Json<ModerationDecision>, AppError> {
    let target = HookTarget::from_slug(&target)
        .ok_or_else(|| AppError::NotFound(format!("Unknown hook: {}", target)))?;
    let request = parse_hook_body(&body);

    Ok(Json(run_accept_hook(&state.moderation, target, &request).await))
}
