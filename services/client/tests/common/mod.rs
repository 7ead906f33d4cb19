use async_trait::async_trait;
use quiz_client_lib::ui::{generation_task::GenerationCompletion, QuizRuntime};
use quiz_master_core::{
    GenerationPrompt, PortError, PortResult, QuestionCount, QuizGateway, QuizGenerationService,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::{mpsc::UnboundedReceiver, Notify};

/// Two questions; the correct answers are B then C.
pub const TWO_QUESTION_QUIZ: &str = r#"```json
{
  "title": "Photosynthesis Basics",
  "questions": [
    {
      "id": 1,
      "question": "Which organelle hosts photosynthesis?",
      "options": ["Nucleus", "Chloroplast", "Ribosome", "Vacuole"],
      "correctAnswer": 1,
      "explanation": "Chloroplasts contain chlorophyll."
    },
    {
      "id": 2,
      "question": "Which gas is released?",
      "options": ["Nitrogen", "Carbon dioxide", "Oxygen", "Helium"],
      "correctAnswer": 2,
      "explanation": "Splitting water releases oxygen."
    }
  ]
}
```"#;

/// Replies with a canned result, optionally holding it until released.
pub struct FakeProvider {
    /// `Err` holds the message of a `PortError::Unexpected`.
    reply: Result<String, String>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn replying(raw: &str) -> Self {
        Self {
            reply: Ok(raw.to_string()),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Waits on `gate` before replying, so a test can act while generation is in flight.
    pub fn gated(raw: &str, gate: Arc<Notify>) -> Self {
        Self {
            reply: Ok(raw.to_string()),
            gate: Some(gate),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuizGenerationService for FakeProvider {
    async fn generate_quiz_json(&self, _prompt: &GenerationPrompt) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.reply.clone().map_err(PortError::Unexpected)
    }
}

pub fn runtime_with(
    provider: Arc<FakeProvider>,
) -> (QuizRuntime, UnboundedReceiver<GenerationCompletion>) {
    QuizRuntime::new(QuizGateway::new(provider), QuestionCount::Five)
}
