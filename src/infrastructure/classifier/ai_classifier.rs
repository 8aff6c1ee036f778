//! HTTP client for the external text-analysis service.
//!
//! The service scores German text with two independent models (general toxicity and
//! hate speech) and reports the detected language. This client applies the operator's
//! thresholds to those scores. It never fails: timeouts, transport errors, non-2xx
//! responses and undecodable bodies all produce the fail-open verdict.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::traits::CommentClassifier;
use crate::domain::moderation::{
    settings::SettingsProvider,
    verdict::{UNKNOWN_LANGUAGE, Verdict},
};
use crate::infrastructure::security::text_extractor::preview;

/// Hard bound on one classification round trip.
pub const CLASSIFIER_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Error)]
enum ClassifierError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    #[error("HTTP {0} from AI service")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

pub struct AiClassifier {
    client: reqwest::Client,
    settings: SettingsProvider,
    timeout: Duration,
}

impl AiClassifier {
    pub fn new(settings: SettingsProvider) -> anyhow::Result<Self> {
        Self::with_timeout(settings, CLASSIFIER_TIMEOUT)
    }

    pub fn with_timeout(settings: SettingsProvider, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            settings,
            timeout,
        })
    }

    async fn analyze(&self, endpoint: &str, text: &str) -> Result<Value, ClassifierError> {
        let response = self
            .client
            .post(endpoint)
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Status(status));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(self.timeout)
            } else {
                ClassifierError::Decode(e.to_string())
            }
        })
    }

    fn classify_transport_error(&self, err: reqwest::Error) -> ClassifierError {
        if err.is_timeout() {
            ClassifierError::Timeout(self.timeout)
        } else {
            ClassifierError::Transport(err)
        }
    }
}

#[async_trait]
impl CommentClassifier for AiClassifier {
    async fn classify(&self, text: &str) -> Verdict {
        if text.trim().is_empty() {
            tracing::debug!("empty comment text, skipping classification");
            return Verdict::fail_open();
        }

        let endpoint = self.settings.endpoint().await;
        let toxicity_threshold = self.settings.toxicity_threshold().await;
        let hate_threshold = self.settings.hate_threshold().await;

        tracing::debug!(
            %endpoint,
            toxicity_threshold,
            hate_threshold,
            text = %preview(text, 100),
            "classifying comment"
        );

        let data = match self.analyze(&endpoint, text).await {
            Ok(data) => data,
            Err(err) => {
                tracing::error!(error = %err, %endpoint, "AI service error, failing open");
                return Verdict::fail_open();
            }
        };

        match decode_verdict(&data, toxicity_threshold, hate_threshold) {
            Some(verdict) => {
                tracing::debug!(
                    allowed = verdict.allowed,
                    score = verdict.score,
                    hate_score = verdict.hate_score,
                    is_german = verdict.is_german,
                    requires_moderation = verdict.requires_moderation,
                    language = %verdict.language,
                    "classification verdict"
                );
                verdict
            }
            None => {
                tracing::error!(response = %data, "AI service returned a non-object body, failing open");
                Verdict::fail_open()
            }
        }
    }
}

/// Decode a raw analysis response, defaulting every field explicitly.
///
/// Returns `None` when the body is not a JSON object. Either model alone crossing its
/// threshold makes the comment toxic.
pub fn decode_verdict(data: &Value, toxicity_threshold: f64, hate_threshold: f64) -> Option<Verdict> {
    let object = data.as_object()?;

    let score = object.get("score").and_then(Value::as_f64).unwrap_or(0.0);
    let hate_score = object
        .get("hate_score")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let toxic = score >= toxicity_threshold || hate_score >= hate_threshold;

    let language = object
        .get("language")
        .and_then(Value::as_str)
        .filter(|l| !l.is_empty())
        .unwrap_or(UNKNOWN_LANGUAGE)
        .to_string();

    Some(Verdict {
        allowed: !toxic,
        score,
        hate_score,
        requires_moderation: is_truthy(object.get("requires_moderation")),
        language,
        is_german: is_confirmed_german(object.get("is_german")),
    })
}

/// Only an explicit `true`, `"true"` or `1` confirms German.
fn is_confirmed_german(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
