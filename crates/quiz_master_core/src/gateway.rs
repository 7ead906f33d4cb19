//! crates/quiz_master_core/src/gateway.rs
//!
//! The quiz generation gateway: one provider call per request, followed by
//! strict parsing of the response into `QuizData`.

use crate::domain::{GenerationRequest, Question, QuizData, OPTIONS_PER_QUESTION};
use crate::ports::{PortError, QuizGenerationService};
use crate::prompt::GenerationPrompt;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::{error, info, warn};

/// Shown to the user whenever generation fails, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate quiz. Please check your content and try again.";

/// Why a generation attempt produced no quiz.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The provider call itself failed (network, auth, vendor error).
    #[error("Provider call failed: {0}")]
    Provider(#[from] PortError),
    /// The response was not JSON of the expected shape.
    #[error("Malformed provider response: {0}")]
    Malformed(String),
    /// The response parsed but broke a quiz invariant.
    #[error("Provider response violates the quiz schema: {0}")]
    Schema(String),
}

impl GenerationError {
    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED_MESSAGE
    }
}

//=========================================================================================
// Wire Format
//=========================================================================================

#[derive(Deserialize)]
struct WireQuiz {
    title: String,
    questions: Vec<WireQuestion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireQuestion {
    id: i64,
    question: String,
    options: Vec<String>,
    correct_answer: i64,
    explanation: String,
}

impl WireQuestion {
    fn into_domain(self, position: usize) -> Result<Question, GenerationError> {
        let option_count = self.options.len();
        let options: [String; OPTIONS_PER_QUESTION] = self.options.try_into().map_err(|_| {
            GenerationError::Schema(format!(
                "question {} has {} options, expected {}",
                position + 1,
                option_count,
                OPTIONS_PER_QUESTION
            ))
        })?;

        let correct_answer = usize::try_from(self.correct_answer)
            .ok()
            .filter(|index| *index < OPTIONS_PER_QUESTION)
            .ok_or_else(|| {
                GenerationError::Schema(format!(
                    "question {} has correctAnswer {}, expected 0..{}",
                    position + 1,
                    self.correct_answer,
                    OPTIONS_PER_QUESTION
                ))
            })?;

        Ok(Question {
            id: self.id,
            question: self.question,
            options,
            correct_answer,
            explanation: self.explanation,
        })
    }
}

//=========================================================================================
// Response Parsing
//=========================================================================================

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("fence pattern is valid")
    })
}

/// Some models wrap JSON in a Markdown fence even when asked not to.
fn strip_code_fence(raw: &str) -> &str {
    code_fence()
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str())
        .unwrap_or(raw)
}

/// Parses a raw provider response into a validated quiz.
///
/// Rejects anything that is not `{title, questions: [...]}` with exactly four
/// options, an in-range `correctAnswer` and a unique `id` on every question.
/// An empty question list is rejected too, since there would be nothing to answer.
pub fn parse_quiz_response(raw: &str) -> Result<QuizData, GenerationError> {
    let body = strip_code_fence(raw);
    let wire: WireQuiz =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    if wire.questions.is_empty() {
        return Err(GenerationError::Schema(
            "response contained no questions".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    let mut questions = Vec::with_capacity(wire.questions.len());
    for (position, wire_question) in wire.questions.into_iter().enumerate() {
        if !seen_ids.insert(wire_question.id) {
            return Err(GenerationError::Schema(format!(
                "question id {} appears more than once",
                wire_question.id
            )));
        }
        questions.push(wire_question.into_domain(position)?);
    }

    Ok(QuizData {
        title: wire.title,
        questions,
    })
}

//=========================================================================================
// The Gateway
//=========================================================================================

/// Wraps a `QuizGenerationService` with the prompt and response contract.
#[derive(Clone)]
pub struct QuizGateway {
    provider: Arc<dyn QuizGenerationService>,
}

impl QuizGateway {
    pub fn new(provider: Arc<dyn QuizGenerationService>) -> Self {
        Self { provider }
    }

    /// Issues exactly one provider call. Never retries.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<QuizData, GenerationError> {
        let prompt = GenerationPrompt::for_request(request);
        let requested = request.question_count().get() as usize;

        let started = Instant::now();
        let raw = self.provider.generate_quiz_json(&prompt).await.map_err(|e| {
            error!("Quiz generation call failed: {}", e);
            GenerationError::from(e)
        })?;
        info!("Provider responded in {:?}", started.elapsed());

        let quiz = parse_quiz_response(&raw).map_err(|e| {
            error!("Rejected provider response: {}", e);
            e
        })?;

        if quiz.len() != requested {
            warn!(
                "Requested {} questions but the provider returned {}",
                requested,
                quiz.len()
            );
        }
        info!("Generated quiz '{}' with {} questions", quiz.title, quiz.len());
        Ok(quiz)
    }
}
