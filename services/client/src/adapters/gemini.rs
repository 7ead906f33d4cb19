//! services/client/src/adapters/gemini.rs
//!
//! This module contains the adapter for Google's Gemini `generateContent` REST API.
//! It implements the `QuizGenerationService` port from the `core` crate.

use async_trait::async_trait;
use quiz_master_core::{GenerationPrompt, PortError, PortResult, QuizGenerationService};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `QuizGenerationService` using the Gemini REST API.
#[derive(Clone)]
pub struct GeminiQuizAdapter {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiQuizAdapter {
    /// Creates a new `GeminiQuizAdapter`.
    pub fn new(client: Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(prompt: &GenerationPrompt) -> GenerateContentRequest {
        let mut parts = vec![Part::Text {
            text: prompt.instruction.clone(),
        }];
        if let Some(source_text) = &prompt.source_text {
            parts.push(Part::Text {
                text: source_text.clone(),
            });
        }
        if let Some(media) = &prompt.media {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: media.mime_type().to_string(),
                    data: media.data().to_string(),
                },
            });
        }

        GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: to_gemini_schema(&prompt.response_schema),
            },
        }
    }
}

/// Converts a standard JSON schema into Gemini's dialect: upper-case type
/// names and no `additionalProperties`.
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| key.as_str() != "additionalProperties")
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(name)) => Value::String(name.to_uppercase()),
                        // Property names are user data, not schema keywords.
                        ("properties", Value::Object(props)) => Value::Object(
                            props
                                .iter()
                                .map(|(name, prop)| (name.clone(), to_gemini_schema(prop)))
                                .collect(),
                        ),
                        _ => to_gemini_schema(value),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> PortResult<String> {
    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        PortError::Unexpected("Gemini returned no candidates in its response.".to_string())
    })?;

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        Err(PortError::Unexpected(
            "Gemini response contained no text content.".to_string(),
        ))
    } else {
        Ok(text)
    }
}

//=========================================================================================
// `QuizGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuizGenerationService for GeminiQuizAdapter {
    /// Sends the prompt, the optional source text and the optional inline attachment
    /// in a single `generateContent` call with a JSON response schema.
    async fn generate_quiz_json(&self, prompt: &GenerationPrompt) -> PortResult<String> {
        let body = Self::build_request(prompt);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PortError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(PortError::NotFound(format!("Gemini model '{}'", self.model)));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PortError::Unexpected(format!(
                "Gemini returned {}: {}",
                status, detail
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        extract_text(payload)
    }
}
