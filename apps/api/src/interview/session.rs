//! Interview session manager.
//!
//! Drives a single interview from question generation through final scoring,
//! enforcing user ownership on every operation. Sessions move `in_progress`
//! → `completed` and nothing else; abandoned sessions simply stay
//! `in_progress`.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ai::service::{AiService, Evaluation, Origin};
use crate::errors::AppError;
use crate::models::interview::{
    InterviewMode, InterviewPatch, InterviewScores, InterviewStatus, InterviewView, QaEntry,
};
use crate::models::resume::ResumeAnalysisRef;
use crate::store::{RecordStore, StoreError};

/// How many times a QA write is retried when it loses a version race.
const VERSION_RETRIES: u32 = 2;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOutcome {
    pub interview_id: Uuid,
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalOutcome {
    pub scores: InterviewScores,
    pub overall_feedback: String,
    pub improvement_suggestions: Vec<String>,
}

fn session_not_found() -> AppError {
    AppError::NotFound("Interview session not found. Please start a new interview.".to_string())
}

/// Starts an interview: resolves optional resume context (best-effort — a
/// missing or foreign analysis id degrades to no context rather than
/// failing), generates the question set, creates the session record.
pub async fn start_interview(
    store: &dyn RecordStore,
    ai: &AiService,
    user_id: Uuid,
    mode: InterviewMode,
    resume_analysis_id: Option<Uuid>,
) -> Result<StartOutcome, AppError> {
    let mut resume_text = String::new();
    let mut analysis = None;
    let mut resume_ref = None;
    if let Some(requested) = resume_analysis_id {
        match store
            .find_resume_analysis_by_id_and_user(requested, user_id)
            .await
        {
            Some(doc) => {
                resume_text = doc.extracted_text;
                analysis = Some(doc.analysis);
                resume_ref = Some(doc.id);
            }
            None => {
                debug!(%requested, "resume analysis unavailable; starting without context")
            }
        }
    }

    let generated = ai
        .generate_questions(&resume_text, analysis.as_ref(), mode)
        .await
        .map_err(|e| {
            warn!("question generation failed: {e}");
            AppError::ServiceUnavailable(
                "Could not generate questions right now. Please try again in a moment."
                    .to_string(),
            )
        })?;
    if generated.origin == Origin::Canned {
        debug!("serving canned question set (no AI credential configured)");
    }

    let interview = store
        .create_interview(user_id, mode, generated.value.clone(), resume_ref)
        .await;

    info!(interview_id = %interview.id, mode = mode.as_str(), "interview started");

    Ok(StartOutcome {
        interview_id: interview.id,
        questions: generated.value,
    })
}

/// Evaluates one answer and writes it at `question_index`, padding any
/// intervening slots with placeholders so out-of-order and retried
/// submissions never fail. The write is a compare-and-swap on the session's
/// update counter; a lost race re-reads and re-merges the already-computed
/// evaluation.
pub async fn submit_answer(
    store: &dyn RecordStore,
    ai: &AiService,
    user_id: Uuid,
    interview_id: Uuid,
    question_index: usize,
    question: &str,
    user_answer: &str,
) -> Result<Evaluation, AppError> {
    let interview = store
        .find_interview_by_id_and_user(interview_id, user_id)
        .await
        .ok_or_else(session_not_found)?;

    if question_index >= interview.questions.len() {
        return Err(AppError::Validation(
            "questionIndex is out of range for this interview.".to_string(),
        ));
    }

    let evaluation = ai
        .evaluate_answer(question, user_answer, interview.mode)
        .await
        .map_err(|e| {
            warn!("answer evaluation failed: {e}");
            AppError::ServiceUnavailable(
                "Could not evaluate your answer right now. Please try again.".to_string(),
            )
        })?
        .value;

    let entry = QaEntry {
        question: question.to_string(),
        user_answer: user_answer.to_string(),
        ai_feedback: evaluation.feedback.clone(),
        score: evaluation.score,
    };

    let mut current = interview;
    for _ in 0..=VERSION_RETRIES {
        let mut qa = current.qa.clone();
        while qa.len() <= question_index {
            qa.push(QaEntry::default());
        }
        qa[question_index] = entry.clone();

        let patch = InterviewPatch {
            qa: Some(qa),
            expected_version: Some(current.version),
            ..Default::default()
        };
        match store.update_interview(interview_id, user_id, patch).await {
            Ok(Some(_)) => return Ok(evaluation),
            Ok(None) => return Err(session_not_found()),
            Err(StoreError::VersionConflict) => {
                debug!(%interview_id, "qa write lost a version race; retrying");
                current = store
                    .find_interview_by_id_and_user(interview_id, user_id)
                    .await
                    .ok_or_else(session_not_found)?;
            }
            Err(e) => return Err(AppError::Internal(anyhow::Error::new(e))),
        }
    }

    Err(AppError::Internal(anyhow::anyhow!(
        "interview update kept conflicting"
    )))
}

/// Aggregates the transcript into final scores and completes the session.
/// Re-finalizing overwrites the previous aggregate; on collaborator failure
/// the record is left untouched.
pub async fn finalize_interview(
    store: &dyn RecordStore,
    ai: &AiService,
    user_id: Uuid,
    interview_id: Uuid,
) -> Result<FinalOutcome, AppError> {
    let interview = store
        .find_interview_by_id_and_user(interview_id, user_id)
        .await
        .ok_or_else(session_not_found)?;

    let report = ai
        .final_feedback(&interview.qa, interview.mode)
        .await
        .map_err(|e| {
            warn!("final feedback failed: {e}");
            AppError::ServiceUnavailable(
                "Could not generate feedback right now. Please try again in a moment."
                    .to_string(),
            )
        })?
        .value;

    let patch = InterviewPatch {
        scores: Some(InterviewScores {
            communication: report.communication,
            confidence: report.confidence,
            technical_depth: report.technical_depth,
        }),
        overall_feedback: Some(report.overall_feedback.clone()),
        improvement_suggestions: Some(report.improvement_suggestions.clone()),
        status: Some(InterviewStatus::Completed),
        ..Default::default()
    };
    let updated = store
        .update_interview(interview_id, user_id, patch)
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?
        .ok_or_else(session_not_found)?;

    info!(interview_id = %updated.id, "interview completed");

    Ok(FinalOutcome {
        scores: InterviewScores {
            communication: report.communication,
            confidence: report.confidence,
            technical_depth: report.technical_depth,
        },
        overall_feedback: report.overall_feedback,
        improvement_suggestions: report.improvement_suggestions,
    })
}

/// All of the user's interviews, most-recent-first, weak resume references
/// resolved.
pub async fn interview_history(store: &dyn RecordStore, user_id: Uuid) -> Vec<InterviewView> {
    store.find_interviews_by_user(user_id).await
}

/// One interview with its weak resume reference resolved to a lightweight
/// summary — or null if the analysis is gone, which is not an error.
pub async fn get_interview(
    store: &dyn RecordStore,
    user_id: Uuid,
    interview_id: Uuid,
) -> Result<InterviewView, AppError> {
    let interview = store
        .find_interview_by_id_and_user(interview_id, user_id)
        .await
        .ok_or_else(|| {
            AppError::NotFound("Interview not found. It may have been deleted.".to_string())
        })?;

    let resume_analysis = match interview.resume_analysis_id {
        Some(rid) => store
            .find_resume_analysis_by_id_and_user(rid, user_id)
            .await
            .as_ref()
            .map(ResumeAnalysisRef::from),
        None => None,
    };

    Ok(InterviewView::from_record(interview, resume_analysis))
}
