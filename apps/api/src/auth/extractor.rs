use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::auth::token::verify_token;
use crate::errors::AppError;
use crate::models::user::PublicUser;
use crate::state::AppState;

/// Authenticated user resolved from the `Authorization: Bearer` header.
/// Rejects with 401 when the token is missing, invalid, expired, or the
/// user no longer exists (the store is volatile; tokens can outlive it).
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Not authorized. No token.".to_string()))?;

        let claims = verify_token(token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Not authorized. Invalid token.".to_string()))?;

        let user = state
            .store
            .find_user_by_id(claims.sub)
            .await
            .ok_or_else(|| AppError::Unauthorized("User not found.".to_string()))?;

        Ok(AuthUser(user))
    }
}
