//! crates/quiz_master_core/src/domain.rs
//!
//! Defines the pure, core data structures for the quiz application.
//! Nothing in here talks to a provider, a file or a terminal.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::fmt;
use thiserror::Error;

/// Every generated question carries exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

//=========================================================================================
// Quiz Content
//=========================================================================================

/// A single multiple-choice question.
///
/// `options` is a fixed-size array, so a question with any other number of
/// options cannot be constructed. `parse_quiz_response` only produces questions
/// whose `correct_answer` indexes into `options`; a hand-built question with an
/// out-of-range index simply never scores as correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub correct_answer: usize,
    pub explanation: String,
}

/// A complete generated quiz. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizData {
    pub title: String,
    pub questions: Vec<Question>,
}

impl QuizData {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//=========================================================================================
// Answers
//=========================================================================================

/// The user's choice for one question.
///
/// `Unanswered` is its own variant so "no selection" can never be mistaken
/// for "selected option 0".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unanswered,
    Chosen(usize),
}

impl Selection {
    pub fn is_answered(&self) -> bool {
        matches!(self, Selection::Chosen(_))
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::Chosen(index) => Some(*index),
            Selection::Unanswered => None,
        }
    }
}

/// One answer slot per question, created unanswered when a quiz is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAnswer {
    pub question_id: i64,
    pub selected_option: Selection,
}

impl UserAnswer {
    pub fn unanswered(question_id: i64) -> Self {
        Self {
            question_id,
            selected_option: Selection::Unanswered,
        }
    }
}

//=========================================================================================
// Generation Input
//=========================================================================================

/// Errors raised before a request ever reaches the generation gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please paste some notes or attach an image or PDF first.")]
    MissingContent,
    #[error("Unsupported file type '{0}'. Only images and PDF documents are accepted.")]
    UnsupportedMedia(String),
    #[error("Question count must be one of 5, 10, 20 or 30 (got {0}).")]
    InvalidQuestionCount(u32),
}

/// The allowed quiz sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionCount {
    #[default]
    Five,
    Ten,
    Twenty,
    Thirty,
}

impl QuestionCount {
    pub const ALL: [QuestionCount; 4] = [
        QuestionCount::Five,
        QuestionCount::Ten,
        QuestionCount::Twenty,
        QuestionCount::Thirty,
    ];

    pub fn get(self) -> u32 {
        match self {
            QuestionCount::Five => 5,
            QuestionCount::Ten => 10,
            QuestionCount::Twenty => 20,
            QuestionCount::Thirty => 30,
        }
    }
}

impl TryFrom<u32> for QuestionCount {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        QuestionCount::ALL
            .into_iter()
            .find(|count| count.get() == value)
            .ok_or(ValidationError::InvalidQuestionCount(value))
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// What kind of document a media attachment holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Pdf,
}

impl MediaKind {
    /// Accepts `image/*` and `application/pdf`, nothing else.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if mime_type == "application/pdf" {
            Some(MediaKind::Pdf)
        } else if mime_type
            .strip_prefix("image/")
            .is_some_and(|subtype| !subtype.is_empty())
        {
            Some(MediaKind::Image)
        } else {
            None
        }
    }
}

/// A single binary attachment, already in its transportable (base64) form.
///
/// Only `from_bytes` builds one, so the MIME type is always an image or a PDF.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    data: String,
    mime_type: String,
    name: String,
    kind: MediaKind,
}

impl MediaAttachment {
    /// Encodes raw file bytes for transport, rejecting anything that is not an image or a PDF.
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
    ) -> Result<Self, ValidationError> {
        let mime_type = mime_type.into();
        let kind = match MediaKind::from_mime(&mime_type) {
            Some(kind) => kind,
            None => return Err(ValidationError::UnsupportedMedia(mime_type)),
        };
        Ok(Self {
            data: BASE64.encode(bytes),
            mime_type,
            name: name.into(),
            kind,
        })
    }

    /// The base64-encoded payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The original file name, for display.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// A `data:` URL, as accepted by providers that take images by URL.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

// The payload can be megabytes of base64; keep it out of logs.
impl fmt::Debug for MediaAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaAttachment")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("encoded_len", &self.data.len())
            .finish()
    }
}

/// Everything the gateway needs to ask the provider for a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    text: String,
    media: Option<MediaAttachment>,
    question_count: QuestionCount,
}

impl GenerationRequest {
    /// Builds a request, requiring at least one content source.
    ///
    /// Whitespace-only text counts as no text.
    pub fn new(
        text: impl Into<String>,
        media: Option<MediaAttachment>,
        question_count: QuestionCount,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() && media.is_none() {
            return Err(ValidationError::MissingContent);
        }
        Ok(Self {
            text,
            media,
            question_count,
        })
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
}
