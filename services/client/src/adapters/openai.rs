//! services/client/src/adapters/openai.rs
//!
//! This module contains the adapter for OpenAI-compatible chat completion models.
//! It implements the `QuizGenerationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageUrlArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use quiz_master_core::{GenerationPrompt, MediaKind, PortError, PortResult, QuizGenerationService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `QuizGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiQuizAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiQuizAdapter {
    /// Creates a new `OpenAiQuizAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn user_parts(
        prompt: &GenerationPrompt,
    ) -> PortResult<Vec<ChatCompletionRequestUserMessageContentPart>> {
        let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> = Vec::new();

        if let Some(source_text) = &prompt.source_text {
            parts.push(
                ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(source_text.as_str())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
            );
        }

        if let Some(media) = &prompt.media {
            // The chat endpoint takes images by URL but has no inline PDF part.
            if media.kind() == MediaKind::Pdf {
                return Err(PortError::Unexpected(format!(
                    "'{}' is a PDF; switch QUIZ_PROVIDER to gemini to quiz from PDF documents.",
                    media.name()
                )));
            }
            let image_url = ImageUrlArgs::default()
                .url(media.data_url())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
            parts.push(
                ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(image_url)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
            );
        }

        Ok(parts)
    }
}

//=========================================================================================
// `QuizGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuizGenerationService for OpenAiQuizAdapter {
    /// Sends the instruction as the system message and the source material as
    /// the user message, constrained to the quiz JSON schema.
    async fn generate_quiz_json(&self, prompt: &GenerationPrompt) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.instruction.as_str())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(Self::user_parts(prompt)?)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let response_format = ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                name: "quiz".to_string(),
                description: Some("A multiple-choice quiz with explanations".to_string()),
                schema: Some(prompt.response_schema.clone()),
                strict: Some(true),
            },
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(response_format)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Unexpected(
                    "Quiz generation LLM response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Unexpected(
                "Quiz generation LLM returned no choices in its response.".to_string(),
            ))
        }
    }
}
