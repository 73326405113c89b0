//! Axum route handlers for registration, login and user lookups.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::token::issue_token;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::PublicUser;
use crate::state::AppState;
use crate::store::StoreError;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validate_registration(&req)?;

    if state.store.find_user_by_email(&req.email).await.is_some() {
        return Err(duplicate_email());
    }

    let user = state
        .store
        .create_user(&req.name, &req.email, &req.password)
        .await
        .map_err(|e| match e {
            StoreError::DuplicateEmail => duplicate_email(),
            other => AppError::Internal(anyhow::Error::new(other)),
        })?;

    let token = issue_token(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_expires_in_hours,
    )
    .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

    info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state.store.find_user_by_email(&req.email).await.ok_or_else(|| {
        AppError::Unauthorized("No account found with this email. Please sign up first.".to_string())
    })?;

    if !state.store.verify_credential(user.id, &req.password).await {
        return Err(AppError::Unauthorized(
            "Incorrect password. Please try again.".to_string(),
        ));
    }

    let token = issue_token(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_expires_in_hours,
    )
    .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

    Ok(Json(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// GET /api/auth/me
pub async fn handle_me(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(user)
}

/// GET /api/user/profile
pub async fn handle_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    state
        .store
        .find_user_by_id(user.id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn duplicate_email() -> AppError {
    AppError::Validation(
        "This email is already registered. Try signing in or use a different email.".to_string(),
    )
}

fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required.".to_string()));
    }
    if !is_plausible_email(&req.email) {
        return Err(AppError::Validation(
            "Please provide a valid email address.".to_string(),
        ));
    }
    if req.password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters.".to_string(),
        ));
    }
    Ok(())
}

/// Cheap shape check only; real verification would need a confirmation mail.
fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
