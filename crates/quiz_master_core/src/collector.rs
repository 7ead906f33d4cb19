//! crates/quiz_master_core/src/collector.rs
//!
//! The editable draft a user builds up before asking for a quiz.

use crate::domain::{GenerationRequest, MediaAttachment, QuestionCount, ValidationError};

/// Gathers free text, at most one attachment and the desired question count.
#[derive(Debug, Clone, Default)]
pub struct ContentCollector {
    text: String,
    media: Option<MediaAttachment>,
    question_count: QuestionCount,
}

impl ContentCollector {
    pub fn new(question_count: QuestionCount) -> Self {
        Self {
            question_count,
            ..Self::default()
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Appends a line of notes, keeping earlier lines.
    pub fn append_text(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    pub fn clear_text(&mut self) {
        self.text.clear();
    }

    /// Replaces any previous attachment.
    pub fn attach(&mut self, media: MediaAttachment) -> Option<MediaAttachment> {
        self.media.replace(media)
    }

    pub fn detach(&mut self) -> Option<MediaAttachment> {
        self.media.take()
    }

    pub fn set_question_count(&mut self, question_count: QuestionCount) {
        self.question_count = question_count;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn media(&self) -> Option<&MediaAttachment> {
        self.media.as_ref()
    }

    pub fn question_count(&self) -> QuestionCount {
        self.question_count
    }

    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty() || self.media.is_some()
    }

    /// Produces a request without consuming the draft, so a failed attempt can be retried.
    pub fn build(&self) -> Result<GenerationRequest, ValidationError> {
        GenerationRequest::new(self.text.clone(), self.media.clone(), self.question_count)
    }

    /// Resets the draft but keeps the chosen question count.
    pub fn reset(&mut self) {
        self.text.clear();
        self.media = None;
    }
}
