use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::interview::{
    Interview, InterviewMode, InterviewPatch, InterviewStatus, InterviewView,
};
use crate::models::resume::{
    AnalysisReport, ResumeAnalysis, ResumeAnalysisRef, ResumeAnalysisSummary,
};
use crate::models::user::{PublicUser, User};
use crate::store::{RecordStore, StoreError};

/// In-process record store. Everything lives under a single lock so multi-map
/// writes (user + email index) stay consistent; critical sections are short
/// and never held across an await.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    users_by_email: HashMap<String, Uuid>,
    /// Head-insertion keeps these most-recent-first, which is part of the
    /// listing contract.
    resume_analyses: Vec<ResumeAnalysis>,
    interviews: Vec<Interview>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        raw_password: &str,
    ) -> Result<User, StoreError> {
        // Hash before taking the lock; bcrypt is slow on purpose.
        let password_hash = bcrypt::hash(raw_password, bcrypt::DEFAULT_COST)
            .map_err(|e| StoreError::Hash(e.to_string()))?;
        let email = normalize_email(email);

        let mut inner = self.inner.write().await;
        if inner.users_by_email.contains_key(&email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.clone(),
            password_hash,
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());
        inner.users_by_email.insert(email, user.id);
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read().await;
        let id = inner.users_by_email.get(&normalize_email(email))?;
        inner.users.get(id).cloned()
    }

    async fn find_user_by_id(&self, id: Uuid) -> Option<PublicUser> {
        let inner = self.inner.read().await;
        inner.users.get(&id).map(PublicUser::from)
    }

    async fn verify_credential(&self, user_id: Uuid, raw_password: &str) -> bool {
        let password_hash = {
            let inner = self.inner.read().await;
            match inner.users.get(&user_id) {
                Some(user) => user.password_hash.clone(),
                None => return false,
            }
        };
        bcrypt::verify(raw_password, &password_hash).unwrap_or(false)
    }

    async fn create_resume_analysis(
        &self,
        user_id: Uuid,
        filename: &str,
        text: &str,
        report: AnalysisReport,
    ) -> ResumeAnalysis {
        let now = Utc::now();
        let doc = ResumeAnalysis {
            id: Uuid::new_v4(),
            user_id,
            original_filename: filename.to_string(),
            extracted_text: text.to_string(),
            analysis: report,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.write().await;
        inner.resume_analyses.insert(0, doc.clone());
        doc
    }

    async fn find_resume_analyses_by_user(&self, user_id: Uuid) -> Vec<ResumeAnalysisSummary> {
        let inner = self.inner.read().await;
        inner
            .resume_analyses
            .iter()
            .filter(|doc| doc.user_id == user_id)
            .map(ResumeAnalysisSummary::from)
            .collect()
    }

    async fn find_resume_analysis_by_id_and_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Option<ResumeAnalysis> {
        let inner = self.inner.read().await;
        inner
            .resume_analyses
            .iter()
            .find(|doc| doc.id == id && doc.user_id == user_id)
            .cloned()
    }

    async fn create_interview(
        &self,
        user_id: Uuid,
        mode: InterviewMode,
        questions: Vec<String>,
        resume_analysis_id: Option<Uuid>,
    ) -> Interview {
        let now = Utc::now();
        let interview = Interview {
            id: Uuid::new_v4(),
            user_id,
            resume_analysis_id,
            mode,
            questions,
            qa: Vec::new(),
            scores: None,
            overall_feedback: None,
            improvement_suggestions: Vec::new(),
            status: InterviewStatus::InProgress,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.write().await;
        inner.interviews.insert(0, interview.clone());
        interview
    }

    async fn find_interview_by_id_and_user(&self, id: Uuid, user_id: Uuid) -> Option<Interview> {
        let inner = self.inner.read().await;
        inner
            .interviews
            .iter()
            .find(|i| i.id == id && i.user_id == user_id)
            .cloned()
    }

    async fn update_interview(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: InterviewPatch,
    ) -> Result<Option<Interview>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(record) = inner
            .interviews
            .iter_mut()
            .find(|i| i.id == id && i.user_id == user_id)
        else {
            return Ok(None);
        };

        if let Some(expected) = patch.expected_version {
            if record.version != expected {
                return Err(StoreError::VersionConflict);
            }
        }

        if let Some(qa) = patch.qa {
            record.qa = qa;
        }
        if let Some(scores) = patch.scores {
            record.scores = Some(scores);
        }
        if let Some(feedback) = patch.overall_feedback {
            record.overall_feedback = Some(feedback);
        }
        if let Some(suggestions) = patch.improvement_suggestions {
            record.improvement_suggestions = suggestions;
        }
        if let Some(status) = patch.status {
            record.status = status;
        }
        record.version += 1;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn find_interviews_by_user(&self, user_id: Uuid) -> Vec<InterviewView> {
        let inner = self.inner.read().await;
        inner
            .interviews
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| {
                let resume_analysis = i.resume_analysis_id.and_then(|rid| {
                    inner
                        .resume_analyses
                        .iter()
                        .find(|doc| doc.id == rid)
                        .map(ResumeAnalysisRef::from)
                });
                InterviewView::from_record(i.clone(), resume_analysis)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            skills: vec!["Rust".to_string()],
            strengths: vec!["Systems background".to_string()],
            weaknesses: vec!["Few quantified results".to_string()],
            role_suitability: "Backend roles".to_string(),
            summary: "An engineer.".to_string(),
            raw_response: String::new(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store
            .create_user("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        let err = store
            .create_user("Other Alice", "  ALICE@Example.COM ", "secret2")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_email_lookup_is_normalized() {
        let store = MemoryStore::new();
        let created = store
            .create_user("Alice", "Alice@Example.com", "secret1")
            .await
            .unwrap();
        let found = store.find_user_by_email("  alice@EXAMPLE.com ").await.unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_credential_verification() {
        let store = MemoryStore::new();
        let user = store
            .create_user("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        assert!(store.verify_credential(user.id, "secret1").await);
        assert!(!store.verify_credential(user.id, "wrong").await);
        assert!(!store.verify_credential(Uuid::new_v4(), "secret1").await);
    }

    #[tokio::test]
    async fn test_user_projection_has_no_hash() {
        let store = MemoryStore::new();
        let user = store
            .create_user("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        let public = store.find_user_by_id(user.id).await.unwrap();
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["name"], "Alice");
    }

    #[tokio::test]
    async fn test_analyses_are_most_recent_first_and_omit_text() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        store
            .create_resume_analysis(user_id, "first.pdf", "text one", sample_report())
            .await;
        store
            .create_resume_analysis(user_id, "second.pdf", "text two", sample_report())
            .await;

        let list = store.find_resume_analyses_by_user(user_id).await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].original_filename, "second.pdf");
        assert_eq!(list[1].original_filename, "first.pdf");

        let json = serde_json::to_value(&list[0]).unwrap();
        assert!(json.get("extractedText").is_none());
    }

    #[tokio::test]
    async fn test_cross_user_lookups_return_none() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let doc = store
            .create_resume_analysis(owner, "cv.pdf", "some text", sample_report())
            .await;
        let interview = store
            .create_interview(owner, InterviewMode::Hr, vec!["Q1".to_string()], None)
            .await;

        assert!(store
            .find_resume_analysis_by_id_and_user(doc.id, stranger)
            .await
            .is_none());
        assert!(store
            .find_interview_by_id_and_user(interview.id, stranger)
            .await
            .is_none());
        assert!(store.find_interviews_by_user(stranger).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_and_bumps_version() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let interview = store
            .create_interview(user_id, InterviewMode::Technical, vec!["Q1".to_string()], None)
            .await;
        assert_eq!(interview.version, 0);

        let patch = InterviewPatch {
            overall_feedback: Some("Solid".to_string()),
            ..Default::default()
        };
        let updated = store
            .update_interview(interview.id, user_id, patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.version, 1);
        assert_eq!(updated.overall_feedback.as_deref(), Some("Solid"));
        // untouched fields survive the merge
        assert_eq!(updated.questions, vec!["Q1".to_string()]);
        assert_eq!(updated.status, InterviewStatus::InProgress);
    }

    #[tokio::test]
    async fn test_update_with_stale_version_conflicts() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let interview = store
            .create_interview(user_id, InterviewMode::Hr, vec!["Q1".to_string()], None)
            .await;

        store
            .update_interview(
                interview.id,
                user_id,
                InterviewPatch {
                    overall_feedback: Some("first".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stale = InterviewPatch {
            overall_feedback: Some("second".to_string()),
            expected_version: Some(0),
            ..Default::default()
        };
        let err = store
            .update_interview(interview.id, user_id, stale)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict));
    }

    #[tokio::test]
    async fn test_update_missing_interview_is_none_not_error() {
        let store = MemoryStore::new();
        let result = store
            .update_interview(Uuid::new_v4(), Uuid::new_v4(), InterviewPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_interview_listing_resolves_weak_reference() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let doc = store
            .create_resume_analysis(user_id, "cv.pdf", "text", sample_report())
            .await;
        store
            .create_interview(
                user_id,
                InterviewMode::Behavioral,
                vec!["Q1".to_string()],
                Some(doc.id),
            )
            .await;
        // dangling reference: the analysis never existed
        store
            .create_interview(
                user_id,
                InterviewMode::Hr,
                vec!["Q1".to_string()],
                Some(Uuid::new_v4()),
            )
            .await;

        let list = store.find_interviews_by_user(user_id).await;
        assert_eq!(list.len(), 2);
        // most-recent-first: the dangling one comes first
        assert!(list[0].resume_analysis.is_none());
        let resolved = list[1].resume_analysis.as_ref().unwrap();
        assert_eq!(resolved.id, doc.id);
        assert_eq!(resolved.original_filename, "cv.pdf");
    }
}
