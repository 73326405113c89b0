//! Deterministic canned content, served when no API credential is configured.
//!
//! Identical inputs always produce identical output, so the application stays
//! fully usable (and testable) offline.

use crate::ai::service::{Evaluation, FinalReport};
use crate::models::interview::{InterviewMode, QaEntry};
use crate::models::resume::AnalysisReport;

/// Marker stored in `raw_response` so canned analyses are auditable as such.
pub const CANNED_RAW_RESPONSE: &str =
    "Canned analysis (set ANTHROPIC_API_KEY for live analysis).";

/// An answer shorter than this is treated as "no real answer given".
const MIN_ANSWER_CHARS: usize = 10;

/// Baseline used when an interview is finalized with no recorded answers.
const DEFAULT_AVG_SCORE: u32 = 70;

pub fn canned_analysis(text: &str) -> AnalysisReport {
    let excerpt: String = text
        .chars()
        .take(500)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    AnalysisReport {
        skills: vec![
            "Communication".to_string(),
            "Problem solving".to_string(),
            "Teamwork".to_string(),
            "Resume-based skills".to_string(),
        ],
        strengths: vec![
            "Strong background from resume".to_string(),
            "Relevant experience".to_string(),
        ],
        weaknesses: vec!["Consider adding more quantifiable achievements".to_string()],
        role_suitability: "Suitable for roles matching experience and skills listed in the resume."
            .to_string(),
        summary: if excerpt.is_empty() {
            "Professional profile from uploaded resume.".to_string()
        } else {
            format!("Professional with experience. Resume excerpt: {excerpt}...")
        },
        raw_response: CANNED_RAW_RESPONSE.to_string(),
    }
}

pub fn canned_questions(mode: InterviewMode) -> Vec<String> {
    let questions: [&str; 5] = match mode {
        InterviewMode::Hr => [
            "Tell me about yourself.",
            "Why do you want to work here?",
            "What are your strengths and weaknesses?",
            "Where do you see yourself in 5 years?",
            "Why should we hire you?",
        ],
        InterviewMode::Technical => [
            "Describe a technical challenge you solved.",
            "How do you stay updated with new technologies?",
            "Explain a project you are proud of.",
            "How do you approach debugging?",
            "What tools do you use for development?",
        ],
        InterviewMode::Behavioral => [
            "Describe a time you worked under pressure.",
            "Tell me about a conflict with a teammate and how you resolved it.",
            "Give an example of when you showed leadership.",
            "Describe a time you failed and what you learned.",
            "Tell me about a goal you achieved.",
        ],
    };
    questions.iter().map(|q| q.to_string()).collect()
}

pub fn canned_evaluation(user_answer: &str) -> Evaluation {
    let has_answer = user_answer.trim().chars().count() > MIN_ANSWER_CHARS;
    if has_answer {
        Evaluation {
            feedback: "Good effort. Try to add more specific examples and structure your answer \
                       using the STAR format (Situation, Task, Action, Result) for stronger \
                       responses."
                .to_string(),
            score: 70,
        }
    } else {
        Evaluation {
            feedback: "Consider giving a longer, more detailed answer with concrete examples \
                       from your experience."
                .to_string(),
            score: 50,
        }
    }
}

pub fn canned_final_report(qa: &[QaEntry], mode: InterviewMode) -> FinalReport {
    let answered = qa
        .iter()
        .filter(|entry| !entry.user_answer.trim().is_empty())
        .count();
    let avg = if qa.is_empty() {
        DEFAULT_AVG_SCORE
    } else {
        let total: u32 = qa.iter().map(|entry| entry.score as u32).sum();
        (total as f64 / qa.len() as f64).round() as u32
    };

    let technical_depth = if mode == InterviewMode::Technical {
        (avg + 10).min(100)
    } else {
        avg
    };

    FinalReport {
        communication: (avg + 5).min(100) as u8,
        confidence: avg.min(100) as u8,
        technical_depth: technical_depth as u8,
        overall_feedback: format!(
            "You answered {answered} of {} questions. Overall, your responses showed a basic \
             understanding of the topics. Focus on providing more detailed answers with specific \
             examples from your experience to demonstrate your skills more effectively.",
            qa.len()
        ),
        improvement_suggestions: vec![
            "Prepare specific examples using the STAR format (Situation, Task, Action, Result) \
             for behavioral questions."
                .to_string(),
            "Practice speaking clearly and at a steady pace to improve communication.".to_string(),
            "Research the company and role beforehand to give more tailored responses."
                .to_string(),
            "Quantify your achievements where possible (e.g., \"increased efficiency by 20%\")."
                .to_string(),
            "Ask clarifying questions if needed to ensure you understand what is being asked."
                .to_string(),
        ],
    }
}
