use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::review_comments::dto::ReviewerContext;
use crate::domain::shared::errors::DomainError;
use crate::presentation::http::{errors::AppError, state::AppState};

/// Bearer token claims identifying a host user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewerClaims {
    /// Host user id.
    pub sub: i32,
    pub username: String,
    /// Host role id, `0` is root.
    pub role: i32,
    pub exp: usize,
}

impl From<ReviewerClaims> for ReviewerContext {
    fn from(claims: ReviewerClaims) -> Self {
        ReviewerContext::new(claims.sub, claims.username, claims.role)
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

pub fn decode_reviewer_claims(
    headers: &HeaderMap,
    secret: &str,
) -> Result<ReviewerClaims, DomainError> {
    let token = extract_bearer_token(headers).ok_or(DomainError::Unauthorized)?;
    decode::<ReviewerClaims>(
        &token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|d| d.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected reviewer token");
        DomainError::Unauthorized
    })
}

pub fn issue_reviewer_token(
    claims: &ReviewerClaims,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Rejects requests without a valid bearer token and exposes the caller as a
/// `ReviewerContext` extension.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = decode_reviewer_claims(req.headers(), &state.config.jwt_secret)?;

    req.extensions_mut().insert(ReviewerContext::from(claims));

    Ok(next.run(req).await)
}
