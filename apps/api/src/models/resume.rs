use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured output of resume analysis. `raw_response` keeps the unparsed
/// model output for audit; canned analyses carry a fixed marker string there.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub skills: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub role_suitability: String,
    pub summary: String,
    #[serde(default)]
    pub raw_response: String,
}

/// A stored resume analysis. Immutable after creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub original_filename: String,
    pub extracted_text: String,
    pub analysis: AnalysisReport,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List projection: the extracted text is returned only by single-record
/// lookups, never in listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysisSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub original_filename: String,
    pub analysis: AnalysisReport,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ResumeAnalysis> for ResumeAnalysisSummary {
    fn from(doc: &ResumeAnalysis) -> Self {
        ResumeAnalysisSummary {
            id: doc.id,
            user_id: doc.user_id,
            original_filename: doc.original_filename.clone(),
            analysis: doc.analysis.clone(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Lightweight shape used when an interview's weak reference to an analysis
/// is resolved for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysisRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub original_filename: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ResumeAnalysis> for ResumeAnalysisRef {
    fn from(doc: &ResumeAnalysis) -> Self {
        ResumeAnalysisRef {
            id: doc.id,
            original_filename: doc.original_filename.clone(),
            created_at: doc.created_at,
        }
    }
}
