pub mod collector;
pub mod controller;
pub mod domain;
pub mod gateway;
pub mod ports;
pub mod prompt;
pub mod scoring;
pub mod session;

pub use collector::ContentCollector;
pub use controller::{
    AppController, AppPhase, CompletionOutcome, ControllerError, GenerationTicket, PhaseKind,
    SessionToken,
};
pub use domain::{
    GenerationRequest, MediaAttachment, MediaKind, Question, QuestionCount, QuizData, Selection,
    UserAnswer, ValidationError, OPTIONS_PER_QUESTION,
};
pub use gateway::{parse_quiz_response, GenerationError, QuizGateway, GENERATION_FAILED_MESSAGE};
pub use ports::{PortError, PortResult, QuizGenerationService};
pub use prompt::{quiz_response_schema, GenerationPrompt};
pub use scoring::{score, Feedback, QuestionReview, ScoreReport};
pub use session::{NavigationError, QuizSession};
