use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::ResumeAnalysisRef;

/// Interview mode. Closed set; selects prompt framing and canned content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewMode {
    Hr,
    Technical,
    Behavioral,
}

impl InterviewMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hr" => Some(InterviewMode::Hr),
            "technical" => Some(InterviewMode::Technical),
            "behavioral" => Some(InterviewMode::Behavioral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewMode::Hr => "hr",
            InterviewMode::Technical => "technical",
            InterviewMode::Behavioral => "behavioral",
        }
    }
}

/// One-way lifecycle: `in_progress` until the final report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    InProgress,
    Completed,
}

/// One answered (or placeholder) slot, index-aligned with `questions`.
/// A default entry marks a question the user has not answered yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaEntry {
    pub question: String,
    pub user_answer: String,
    pub ai_feedback: String,
    pub score: u8,
}

/// Final aggregate scores, each 0-100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewScores {
    pub communication: u8,
    pub confidence: u8,
    pub technical_depth: u8,
}

/// An interview session record. `resume_analysis_id` is a weak reference:
/// lookup only, and the referenced analysis being gone is not an error.
#[derive(Debug, Clone)]
pub struct Interview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_analysis_id: Option<Uuid>,
    pub mode: InterviewMode,
    pub questions: Vec<String>,
    pub qa: Vec<QaEntry>,
    pub scores: Option<InterviewScores>,
    pub overall_feedback: Option<String>,
    pub improvement_suggestions: Vec<String>,
    pub status: InterviewStatus,
    /// Update counter for optimistic concurrency; bumped on every update.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied by `update_interview`. Unset fields keep their
/// stored values. When `expected_version` is set, the update only applies
/// if the stored version still matches (compare-and-swap).
#[derive(Debug, Clone, Default)]
pub struct InterviewPatch {
    pub qa: Option<Vec<QaEntry>>,
    pub scores: Option<InterviewScores>,
    pub overall_feedback: Option<String>,
    pub improvement_suggestions: Option<Vec<String>>,
    pub status: Option<InterviewStatus>,
    pub expected_version: Option<u64>,
}

/// Wire shape for history listings and single-interview reads: the weak
/// resume reference is resolved to a lightweight summary, or null if the
/// analysis no longer exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub resume_analysis: Option<ResumeAnalysisRef>,
    pub mode: InterviewMode,
    pub questions: Vec<String>,
    pub qa: Vec<QaEntry>,
    pub scores: Option<InterviewScores>,
    pub overall_feedback: Option<String>,
    pub improvement_suggestions: Vec<String>,
    pub status: InterviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewView {
    pub fn from_record(interview: Interview, resume_analysis: Option<ResumeAnalysisRef>) -> Self {
        InterviewView {
            id: interview.id,
            user_id: interview.user_id,
            resume_analysis,
            mode: interview.mode,
            questions: interview.questions,
            qa: interview.qa,
            scores: interview.scores,
            overall_feedback: interview.overall_feedback,
            improvement_suggestions: interview.improvement_suggestions,
            status: interview.status,
            created_at: interview.created_at,
            updated_at: interview.updated_at,
        }
    }
}
