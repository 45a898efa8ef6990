use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts,
};

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_token, Claims};

/// Extractor for authenticated requests. Rejects with 401 when the
/// Authorization header is missing or the token does not verify.
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// User id from the JWT subject.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid user id in token.".to_string()))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| AppError::Unauthorized("Authentication required.".to_string()))?;

        let claims = decode_token(&token, &state.config.jwt_secret)?;

        Ok(AuthUser(claims))
    }
}

/// Extractor for public endpoints that still personalize their response
/// (the `liked` flag on event listings). Never rejects: a missing or
/// invalid token simply yields `None`.
pub struct MaybeAuthUser(pub Option<Claims>);

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().and_then(|claims| claims.sub.parse().ok())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = match bearer_token(parts) {
            Ok(Some(token)) => decode_token(&token, &state.config.jwt_secret).ok(),
            _ => None,
        };

        Ok(MaybeAuthUser(claims))
    }
}

/// Pull the token out of a `Bearer` Authorization header, if present.
fn bearer_token(parts: &Parts) -> Result<Option<String>, AppError> {
    let Some(auth_header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_header_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Malformed Authorization header.".to_string()))?;

    let token = auth_header_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid token format.".to_string()))?;

    Ok(Some(token.to_string()))
}
