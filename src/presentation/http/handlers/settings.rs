use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::{Deserialize, Serialize};

use crate::application::review_comments::dto::ReviewerContext;
use crate::domain::moderation::settings::EffectiveSettings;
use crate::presentation::http::{errors::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SettingResponse {
    pub name: String,
    pub value: String,
}

fn require_root(reviewer: &ReviewerContext) -> Result<(), AppError> {
    if reviewer.is_root {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only the instance administrator can manage settings".to_string(),
        ))
    }
}

pub async fn get_settings(
    State(state): State<AppState>,
    Extension(reviewer): Extension<ReviewerContext>,
) -> Result<Json<EffectiveSettings>, AppError> {
    require_root(&reviewer)?;
    Ok(Json(state.settings.effective().await))
}

pub async fn update_setting(
    State(state): State<AppState>,
    Extension(reviewer): Extension<ReviewerContext>,
    Path(name): Path<String>,
    Json(body): Json<UpdateSettingRequest>,
) -> Result<Json<SettingResponse>, AppError> {
    require_root(&reviewer)?;
    let value = state.settings.update(&name, &body.value).await?;
    tracing::info!(setting = %name, reviewer = %reviewer.username, "setting changed by reviewer");
    Ok(Json(SettingResponse { name, value }))
}
