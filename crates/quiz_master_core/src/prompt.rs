//! crates/quiz_master_core/src/prompt.rs
//!
//! Builds the provider-neutral prompt and the JSON schema the response must follow.

use crate::domain::{GenerationRequest, MediaAttachment, QuestionCount};
use serde_json::{json, Value};

const SOURCE_TEXT_PREFIX: &str = "Source material (Text): ";

/// A provider-neutral description of one generation call.
///
/// Adapters turn this into their own wire format: the instruction first,
/// then the optional source text, then the optional inline attachment.
#[derive(Debug, Clone)]
pub struct GenerationPrompt {
    pub instruction: String,
    pub source_text: Option<String>,
    pub media: Option<MediaAttachment>,
    pub question_count: QuestionCount,
    pub response_schema: Value,
}

impl GenerationPrompt {
    pub fn for_request(request: &GenerationRequest) -> Self {
        let source_text = if request.text().trim().is_empty() {
            None
        } else {
            Some(format!("{}{}", SOURCE_TEXT_PREFIX, request.text()))
        };

        Self {
            instruction: instruction_for(request.question_count()),
            source_text,
            media: request.media().cloned(),
            question_count: request.question_count(),
            response_schema: quiz_response_schema(),
        }
    }
}

fn instruction_for(question_count: QuestionCount) -> String {
    format!(
        "Act as an expert educator. Based on the provided content (text notes, textbook image, or PDF document), \
generate a high-quality multiple-choice quiz.\n\
Focus on key concepts, facts, and understanding.\n\
Generate exactly {} questions.\n\
Each question must have exactly 4 options.\n\
Provide a clear explanation for the correct answer.",
        question_count.get()
    )
}

/// The response shape, as a standard JSON schema with lower-case type names.
pub fn quiz_response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "description": "A catchy title for the quiz" },
            "questions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "question": { "type": "string" },
                        "options": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Exactly 4 options"
                        },
                        "correctAnswer": {
                            "type": "integer",
                            "description": "Zero-based index of the correct option (0-3)"
                        },
                        "explanation": {
                            "type": "string",
                            "description": "Brief explanation of why this answer is correct"
                        }
                    },
                    "required": ["id", "question", "options", "correctAnswer", "explanation"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["title", "questions"],
        "additionalProperties": false
    })
}
