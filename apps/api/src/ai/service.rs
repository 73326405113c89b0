//! The four content operations the rest of the application depends on:
//! resume analysis, question generation, per-answer evaluation, and final
//! aggregation.
//!
//! Degradation contract: with no API credential configured every operation
//! succeeds with deterministic canned content, tagged `Origin::Canned`. With
//! a credential configured, a network or parse failure is an `Err` — the
//! caller decides how to surface it, and canned content is never substituted
//! behind its back.

use serde::{Deserialize, Serialize};

use crate::ai::{mock, prompts, strip_json_fences, LlmClient, LlmError};
use crate::models::interview::{InterviewMode, QaEntry};
use crate::models::resume::AnalysisReport;

/// Analysis prompts carry at most this much resume text.
const ANALYSIS_INPUT_LIMIT: usize = 12_000;
/// Question prompts carry at most this much resume text.
const QUESTION_CONTEXT_LIMIT: usize = 3_000;

/// Where a generated value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Live model output.
    Model,
    /// Deterministic stand-in; only served when no credential is configured.
    Canned,
}

/// A generated value tagged with its origin, so a degraded stand-in can
/// never be mistaken for live output.
#[derive(Debug, Clone)]
pub struct Generated<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Generated<T> {
    fn model(value: T) -> Self {
        Generated {
            value,
            origin: Origin::Model,
        }
    }

    fn canned(value: T) -> Self {
        Generated {
            value,
            origin: Origin::Canned,
        }
    }
}

/// Feedback on a single answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub feedback: String,
    pub score: u8,
}

/// Final aggregate over a whole interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub communication: u8,
    pub confidence: u8,
    pub technical_depth: u8,
    pub overall_feedback: String,
    pub improvement_suggestions: Vec<String>,
}

/// AI content collaborator. Holds a live client when a credential is
/// configured, otherwise serves canned content.
pub struct AiService {
    client: Option<LlmClient>,
}

impl AiService {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: api_key.map(LlmClient::new),
        }
    }

    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    /// Analyzes extracted resume text into a structured report. The raw
    /// model output is kept alongside the parsed fields for audit.
    pub async fn analyze_resume(
        &self,
        text: &str,
    ) -> Result<Generated<AnalysisReport>, LlmError> {
        let Some(client) = &self.client else {
            return Ok(Generated::canned(mock::canned_analysis(text)));
        };

        let excerpt: String = text.chars().take(ANALYSIS_INPUT_LIMIT).collect();
        let prompt = prompts::ANALYZE_PROMPT_TEMPLATE.replace("{resume_text}", &excerpt);

        let response = client.call(&prompt, prompts::JSON_ONLY_SYSTEM, 0.3).await?;
        let raw = response.text().ok_or(LlmError::EmptyContent)?.to_string();
        let mut report: AnalysisReport =
            serde_json::from_str(strip_json_fences(&raw)).map_err(LlmError::Parse)?;
        report.raw_response = raw;

        Ok(Generated::model(report))
    }

    /// Generates the question set for a new interview. Resume context is
    /// optional; without it the prompt says so and the model improvises.
    pub async fn generate_questions(
        &self,
        resume_text: &str,
        analysis: Option<&AnalysisReport>,
        mode: InterviewMode,
    ) -> Result<Generated<Vec<String>>, LlmError> {
        let Some(client) = &self.client else {
            return Ok(Generated::canned(mock::canned_questions(mode)));
        };

        let summary = analysis
            .map(|a| a.summary.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("Not provided");
        let skills = analysis
            .filter(|a| !a.skills.is_empty())
            .map(|a| a.skills.join(", "))
            .unwrap_or_else(|| "Not provided".to_string());
        let excerpt: String = resume_text.chars().take(QUESTION_CONTEXT_LIMIT).collect();

        let prompt = prompts::QUESTIONS_PROMPT_TEMPLATE
            .replace("{mode_desc}", prompts::mode_description(mode))
            .replace("{summary}", summary)
            .replace("{skills}", &skills)
            .replace("{resume_excerpt}", &excerpt);

        let questions: Vec<String> = client
            .call_json(&prompt, prompts::JSON_ONLY_SYSTEM, 0.8)
            .await?;

        Ok(Generated::model(questions))
    }

    /// Evaluates a single answer. A blank answer is replaced with a literal
    /// placeholder so the model grades the silence, not an empty string.
    pub async fn evaluate_answer(
        &self,
        question: &str,
        user_answer: &str,
        mode: InterviewMode,
    ) -> Result<Generated<Evaluation>, LlmError> {
        let Some(client) = &self.client else {
            return Ok(Generated::canned(mock::canned_evaluation(user_answer)));
        };

        let answer = if user_answer.trim().is_empty() {
            "(No answer or inaudible)"
        } else {
            user_answer
        };

        let prompt = prompts::EVALUATE_PROMPT_TEMPLATE
            .replace("{question}", question)
            .replace("{answer}", answer)
            .replace("{mode}", mode.as_str());

        let mut evaluation: Evaluation = client
            .call_json(&prompt, prompts::JSON_ONLY_SYSTEM, 0.4)
            .await?;
        evaluation.score = evaluation.score.min(100);

        Ok(Generated::model(evaluation))
    }

    /// Aggregates the full Q&A transcript into final scores and suggestions.
    pub async fn final_feedback(
        &self,
        qa: &[QaEntry],
        mode: InterviewMode,
    ) -> Result<Generated<FinalReport>, LlmError> {
        let Some(client) = &self.client else {
            return Ok(Generated::canned(mock::canned_final_report(qa, mode)));
        };

        let transcript = qa
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "Q{}: {}\nA: {}\nFeedback: {}\nScore: {}",
                    i + 1,
                    entry.question,
                    non_empty_or(&entry.user_answer, "N/A"),
                    non_empty_or(&entry.ai_feedback, "N/A"),
                    entry.score
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = prompts::FEEDBACK_PROMPT_TEMPLATE
            .replace("{mode}", mode.as_str())
            .replace("{qa_transcript}", &transcript);

        let mut report: FinalReport = client
            .call_json(&prompt, prompts::JSON_ONLY_SYSTEM, 0.4)
            .await?;
        report.communication = report.communication.min(100);
        report.confidence = report.confidence.min(100);
        report.technical_depth = report.technical_depth.min(100);

        Ok(Generated::model(report))
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
