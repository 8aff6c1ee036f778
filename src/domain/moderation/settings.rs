//! Live moderation settings.
//!
//! Settings are stored by the operator and re-read on every moderation decision so that
//! strictness can be changed without restarting the service. Each accessor applies its
//! own default and coercion; nothing here is cached.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use ts_rs::TS;

use super::repository::SettingsRepository;
use crate::domain::shared::errors::DomainError;

pub const ENDPOINT_KEY: &str = "endpoint";
pub const THRESHOLD_KEY: &str = "threshold";
pub const HATE_THRESHOLD_KEY: &str = "hate_threshold";
pub const NON_GERMAN_ACTION_KEY: &str = "non_german_action";

pub const DEFAULT_ENDPOINT: &str = "http://ai-moderator:8000/analyze";
pub const DEFAULT_TOXICITY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_HATE_THRESHOLD: f64 = 0.5;

/// Every known setting with the value registered on first start.
pub const SETTING_DEFAULTS: &[(&str, &str)] = &[
    (ENDPOINT_KEY, DEFAULT_ENDPOINT),
    (THRESHOLD_KEY, "0.7"),
    (HATE_THRESHOLD_KEY, "0.5"),
    (NON_GERMAN_ACTION_KEY, "moderate"),
];

/// Operator-selected handling of comments not confirmed as German.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NonGermanAction {
    /// Hold for manual review.
    #[default]
    Moderate,
    /// Refuse outright.
    Block,
}

impl NonGermanAction {
    /// Anything other than an exact `"block"` means moderate.
    pub fn from_setting(raw: Option<&str>) -> Self {
        match raw {
            Some("block") => Self::Block,
            _ => Self::Moderate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moderate => "moderate",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for NonGermanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric coercion with fallback: unparsable, NaN and zero all fall back.
pub fn parse_threshold(raw: Option<&str>, fallback: f64) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| !v.is_nan() && *v != 0.0)
        .unwrap_or(fallback)
}

/// Validates an operator-supplied value before it is stored.
pub fn validate_setting(name: &str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    match name {
        THRESHOLD_KEY | HATE_THRESHOLD_KEY => {
            let parsed = value.parse::<f64>().map_err(|_| {
                DomainError::ValidationError(format!("{} must be a number", name))
            })?;
            if !(parsed > 0.0 && parsed <= 1.0) {
                return Err(DomainError::ValidationError(format!(
                    "{} must be within (0, 1]",
                    name
                )));
            }
            Ok(value.to_string())
        }
        NON_GERMAN_ACTION_KEY => match value {
            "moderate" | "block" => Ok(value.to_string()),
            _ => Err(DomainError::ValidationError(
                "non_german_action must be one of moderate, block".to_string(),
            )),
        },
        ENDPOINT_KEY => {
            let url = reqwest::Url::parse(value).map_err(|_| {
                DomainError::ValidationError("endpoint must be an absolute URL".to_string())
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(DomainError::ValidationError(
                    "endpoint must use http or https".to_string(),
                ));
            }
            Ok(value.to_string())
        }
        other => Err(DomainError::ValidationError(format!(
            "unknown setting: {}",
            other
        ))),
    }
}

/// Snapshot of the effective settings, used for the admin view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EffectiveSettings {
    pub endpoint: String,
    pub threshold: f64,
    pub hate_threshold: f64,
    pub non_german_action: NonGermanAction,
}

/// Per-call settings reader.
#[derive(Clone)]
pub struct SettingsProvider {
    repository: Arc<dyn SettingsRepository>,
}

impl SettingsProvider {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self { repository }
    }

    async fn raw(&self, name: &str) -> Option<String> {
        match self.repository.get(name).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                tracing::warn!(setting = name, error = %err, "setting read failed, using default");
                None
            }
        }
    }

    pub async fn endpoint(&self) -> String {
        self.raw(ENDPOINT_KEY)
            .await
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub async fn toxicity_threshold(&self) -> f64 {
        parse_threshold(
            self.raw(THRESHOLD_KEY).await.as_deref(),
            DEFAULT_TOXICITY_THRESHOLD,
        )
    }

    pub async fn hate_threshold(&self) -> f64 {
        parse_threshold(
            self.raw(HATE_THRESHOLD_KEY).await.as_deref(),
            DEFAULT_HATE_THRESHOLD,
        )
    }

    pub async fn non_german_action(&self) -> NonGermanAction {
        NonGermanAction::from_setting(self.raw(NON_GERMAN_ACTION_KEY).await.as_deref())
    }

    pub async fn effective(&self) -> EffectiveSettings {
        EffectiveSettings {
            endpoint: self.endpoint().await,
            threshold: self.toxicity_threshold().await,
            hate_threshold: self.hate_threshold().await,
            non_german_action: self.non_german_action().await,
        }
    }

    /// Registers every known setting with its default, keeping existing values.
    pub async fn register_defaults(&self) -> Result<(), DomainError> {
        for (name, value) in SETTING_DEFAULTS {
            self.repository.insert_default(name, value).await?;
        }
        Ok(())
    }

    pub async fn update(&self, name: &str, value: &str) -> Result<String, DomainError> {
        let value = validate_setting(name, value)?;
        self.repository.set(name, &value).await?;
        tracing::info!(setting = name, value = %value, "moderation setting updated");
        Ok(value)
    }
}
