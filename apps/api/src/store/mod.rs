pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::interview::{Interview, InterviewMode, InterviewPatch, InterviewView};
use crate::models::resume::{AnalysisReport, ResumeAnalysis, ResumeAnalysisSummary};
use crate::models::user::{PublicUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("record was modified concurrently")]
    VersionConflict,

    #[error("credential hashing failed: {0}")]
    Hash(String),
}

/// Narrow storage contract. All record lookups are user-scoped and return
/// `None` both for missing records and for records owned by another user, so
/// existence never leaks across accounts. "Not found" is an absent value,
/// never an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        raw_password: &str,
    ) -> Result<User, StoreError>;

    /// Trimmed, case-insensitive exact match on the normalized email.
    async fn find_user_by_email(&self, email: &str) -> Option<User>;

    /// Credential hash excluded from the projection.
    async fn find_user_by_id(&self, id: Uuid) -> Option<PublicUser>;

    /// Compares against the store's internal record; the hash itself is
    /// never exposed.
    async fn verify_credential(&self, user_id: Uuid, raw_password: &str) -> bool;

    async fn create_resume_analysis(
        &self,
        user_id: Uuid,
        filename: &str,
        text: &str,
        report: AnalysisReport,
    ) -> ResumeAnalysis;

    /// Most-recent-first, extracted text omitted.
    async fn find_resume_analyses_by_user(&self, user_id: Uuid) -> Vec<ResumeAnalysisSummary>;

    async fn find_resume_analysis_by_id_and_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Option<ResumeAnalysis>;

    async fn create_interview(
        &self,
        user_id: Uuid,
        mode: InterviewMode,
        questions: Vec<String>,
        resume_analysis_id: Option<Uuid>,
    ) -> Interview;

    async fn find_interview_by_id_and_user(&self, id: Uuid, user_id: Uuid) -> Option<Interview>;

    /// Merges set fields, refreshes the update timestamp and bumps the
    /// version counter. `Ok(None)` when no matching record exists.
    async fn update_interview(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: InterviewPatch,
    ) -> Result<Option<Interview>, StoreError>;

    /// Most-recent-first, with each weak resume reference resolved to a
    /// lightweight summary (or null when the analysis is gone).
    async fn find_interviews_by_user(&self, user_id: Uuid) -> Vec<InterviewView>;
}
