//! Axum route handlers for the interview API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::ai::service::Evaluation;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interview::session::{self, FinalOutcome, StartOutcome};
use crate::models::interview::{InterviewMode, InterviewView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    pub mode: String,
    pub resume_analysis_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub interview_id: Uuid,
    pub question_index: usize,
    pub question: String,
    #[serde(default)]
    pub user_answer: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub interview_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/interview/questions
pub async fn handle_questions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<StartRequest>,
) -> Result<(StatusCode, Json<StartOutcome>), AppError> {
    let mode = InterviewMode::parse(&req.mode).ok_or_else(|| {
        AppError::Validation("Invalid mode. Use hr, technical, or behavioral.".to_string())
    })?;

    let outcome = session::start_interview(
        state.store.as_ref(),
        &state.ai,
        user.id,
        mode,
        req.resume_analysis_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// POST /api/interview/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<Evaluation>, AppError> {
    let evaluation = session::submit_answer(
        state.store.as_ref(),
        &state.ai,
        user.id,
        req.interview_id,
        req.question_index,
        &req.question,
        &req.user_answer,
    )
    .await?;

    Ok(Json(evaluation))
}

/// POST /api/interview/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FinalOutcome>, AppError> {
    let outcome = session::finalize_interview(
        state.store.as_ref(),
        &state.ai,
        user.id,
        req.interview_id,
    )
    .await?;

    Ok(Json(outcome))
}

/// GET /api/interview/history
pub async fn handle_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Json<Vec<InterviewView>> {
    Json(session::interview_history(state.store.as_ref(), user.id).await)
}

/// GET /api/interview/history/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    session::get_interview(state.store.as_ref(), user.id, id)
        .await
        .map(Json)
}
