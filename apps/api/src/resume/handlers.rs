//! Axum route handlers for resume upload and retrieval.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{AnalysisReport, ResumeAnalysis, ResumeAnalysisSummary};
use crate::resume::extract::{extract_text, is_supported_mime};
use crate::state::AppState;

/// Extracted text shorter than this is treated as unreadable (image-only
/// scans mostly).
const MIN_EXTRACTED_CHARS: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: UploadUser,
    pub original_filename: String,
    pub extracted_text: String,
    pub analysis: AnalysisReport,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume/upload
///
/// Multipart upload (field `resume`, PDF or DOCX): extract text, run the
/// analysis, store the record.
pub async fn handle_upload(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let Some((filename, mime, bytes)) = read_resume_field(&mut multipart).await? else {
        return Err(AppError::Validation(
            "No file uploaded. Please choose a PDF or DOCX file.".to_string(),
        ));
    };

    if !is_supported_mime(&mime) {
        return Err(AppError::Validation(
            "Only PDF and DOCX files are allowed.".to_string(),
        ));
    }

    let text = match extract_text(&bytes, &mime) {
        Ok(text) => text,
        Err(e) => {
            warn!("resume extraction failed: {e}");
            return Err(AppError::Validation(
                "Could not read the file. It may be corrupted or not a valid PDF/DOCX. \
                 Try a different file."
                    .to_string(),
            ));
        }
    };

    if text.trim().chars().count() < MIN_EXTRACTED_CHARS {
        return Err(AppError::Validation(
            "Could not extract enough text from the file. Make sure the document contains \
             readable text (not only images)."
                .to_string(),
        ));
    }

    let generated = state.ai.analyze_resume(&text).await.map_err(|e| {
        warn!("resume analysis failed: {e}");
        AppError::ServiceUnavailable(
            "Analysis service is temporarily unavailable. Please try again later.".to_string(),
        )
    })?;

    let doc: ResumeAnalysis = state
        .store
        .create_resume_analysis(user.id, &filename, &text, generated.value)
        .await;

    info!(user_id = %user.id, analysis_id = %doc.id, "resume analyzed");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: doc.id,
            user: UploadUser {
                id: user.id,
                name: user.name,
                email: user.email,
            },
            original_filename: doc.original_filename,
            extracted_text: doc.extracted_text,
            analysis: doc.analysis,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }),
    ))
}

/// GET /api/resume/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Json<Vec<ResumeAnalysisSummary>> {
    Json(state.store.find_resume_analyses_by_user(user.id).await)
}

/// GET /api/resume/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    state
        .store
        .find_resume_analysis_by_id_and_user(id, user.id)
        .await
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound("Resume analysis not found. It may have been deleted.".to_string())
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart plumbing
// ────────────────────────────────────────────────────────────────────────────

/// Pulls the `resume` field out of the multipart body. `Ok(None)` when the
/// field is absent; read failures (including the 5 MB body cap) map to 400.
async fn read_resume_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, String, bytes::Bytes)>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("multipart read failed: {e}");
        AppError::Validation("Invalid upload. Please try again with a smaller file.".to_string())
    })? {
        if field.name() != Some("resume") {
            continue;
        }
        let filename = field.file_name().unwrap_or("resume").to_string();
        let mime = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            warn!("multipart field read failed: {e}");
            AppError::Validation("File too large. Maximum size is 5MB.".to_string())
        })?;
        return Ok(Some((filename, mime, bytes)));
    }
    Ok(None)
}
