//! Prompt templates for the four content operations.
//!
//! Placeholders are `{name}` tokens substituted with `str::replace`.

use crate::models::interview::InterviewMode;

/// System prompt enforcing JSON-only output across all operations.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Interview-mode framing inserted into the question prompt.
pub fn mode_description(mode: InterviewMode) -> &'static str {
    match mode {
        InterviewMode::Hr => "HR / general fit and motivation",
        InterviewMode::Technical => "Technical skills and problem-solving",
        InterviewMode::Behavioral => "Behavioral / STAR format",
    }
}

pub const ANALYZE_PROMPT_TEMPLATE: &str = "\
You are an expert career coach. Analyze this resume and respond with a JSON object with exactly these keys:
- skills: array of strings (technical and soft skills mentioned)
- strengths: array of strings (key strengths)
- weaknesses: array of strings (gaps or areas to improve)
- roleSuitability: string (1-2 sentences on suitable roles)
- summary: string (2-4 sentence executive summary: candidate's background, key experience, main skills, and career focus. Write in third person. Do NOT copy raw text, contact details (email, phone, LinkedIn), or verbatim excerpts. Be concise and professional.)

Resume text:
---
{resume_text}
---

Return only the JSON object.";

pub const QUESTIONS_PROMPT_TEMPLATE: &str = "\
You are an expert interviewer. Generate exactly 5 UNIQUE, PERSONALIZED interview questions for a {mode_desc} interview.

CRITICAL: Base questions STRICTLY on this specific candidate's resume. Reference their actual experience, projects, skills, and background. Each candidate must get DIFFERENT questions - never use the same generic set. Vary question types and make them specific to this candidate.

Resume summary: {summary}
Skills: {skills}

Resume excerpt:
{resume_excerpt}

Return a JSON array of exactly 5 strings, each being one question. Example: [\"Question 1?\", \"Question 2?\", ...]
No other text, only the JSON array.";

pub const EVALUATE_PROMPT_TEMPLATE: &str = "\
You are an expert interviewer giving real-time feedback.
Question: {question}
Candidate answer (transcribed): {answer}
Interview mode: {mode}

Respond with a JSON object with:
- feedback: string (2-4 sentences, constructive)
- score: number 0-100 (how good the answer was)

Return only the JSON object.";

pub const FEEDBACK_PROMPT_TEMPLATE: &str = "\
You are an expert career coach. Based on this interview Q&A and per-answer feedback, provide a final evaluation.

Interview mode: {mode}

{qa_transcript}

Respond with a JSON object with:
- communication: number 0-100
- confidence: number 0-100
- technicalDepth: number 0-100
- overallFeedback: string (paragraph)
- improvementSuggestions: array of 3-5 strings

Return only the JSON object.";
