//! crates/quiz_master_core/src/controller.rs
//!
//! The top-level state machine: Idle -> Generating -> Quiz -> Results -> Idle.
//!
//! Each phase carries exactly the data that is valid in it, so a quiz exists
//! only in `Quiz` and `Results`, and an error message only in `Idle`.

use crate::collector::ContentCollector;
use crate::domain::{GenerationRequest, QuizData, UserAnswer, ValidationError};
use crate::gateway::{GenerationError, QuizGateway, GENERATION_FAILED_MESSAGE};
use crate::scoring::{score, ScoreReport};
use crate::session::{NavigationError, QuizSession};
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

//=========================================================================================
// Phase Types
//=========================================================================================

/// Tags one generation attempt so a late response for an abandoned attempt can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The bare name of a phase, for logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Generating,
    Quiz,
    Results,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseKind::Idle => "idle",
            PhaseKind::Generating => "generating",
            PhaseKind::Quiz => "taking the quiz",
            PhaseKind::Results => "showing results",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub enum AppPhase {
    Idle {
        error: Option<String>,
    },
    Generating {
        token: SessionToken,
    },
    Quiz {
        session: QuizSession,
    },
    Results {
        quiz: QuizData,
        answers: Vec<UserAnswer>,
        report: ScoreReport,
        finished_at: DateTime<Utc>,
    },
}

impl AppPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            AppPhase::Idle { .. } => PhaseKind::Idle,
            AppPhase::Generating { .. } => PhaseKind::Generating,
            AppPhase::Quiz { .. } => PhaseKind::Quiz,
            AppPhase::Results { .. } => PhaseKind::Results,
        }
    }

    fn idle() -> Self {
        AppPhase::Idle { error: None }
    }
}

/// Handed out when generation starts; the token must accompany the result.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub token: SessionToken,
    pub request: GenerationRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The result belonged to the current attempt and moved the controller to this phase.
    Applied(PhaseKind),
    /// The result belonged to an abandoned attempt and changed nothing.
    Discarded,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Cannot {action} while {phase}.")]
    InvalidTransition {
        action: &'static str,
        phase: PhaseKind,
    },
    #[error("A quiz is already being generated.")]
    GenerationInFlight,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

//=========================================================================================
// The Controller
//=========================================================================================

#[derive(Debug, Clone)]
pub struct AppController {
    phase: AppPhase,
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}

impl AppController {
    pub fn new() -> Self {
        Self {
            phase: AppPhase::idle(),
        }
    }

    pub fn phase(&self) -> &AppPhase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            AppPhase::Idle { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn quiz(&self) -> Option<&QuizData> {
        match &self.phase {
            AppPhase::Quiz { session } => Some(session.quiz()),
            AppPhase::Results { quiz, .. } => Some(quiz),
            _ => None,
        }
    }

    /// The working answers during a quiz, the finalized ones on the results screen.
    pub fn answers(&self) -> &[UserAnswer] {
        match &self.phase {
            AppPhase::Quiz { session } => session.answers(),
            AppPhase::Results { answers, .. } => answers,
            _ => &[],
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            AppPhase::Quiz { session } => Some(session),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&ScoreReport> {
        match &self.phase {
            AppPhase::Results { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn can_generate(&self) -> bool {
        matches!(self.phase, AppPhase::Idle { .. })
    }

    // --- Generation ---

    fn ensure_can_generate(&self) -> Result<(), ControllerError> {
        match self.kind() {
            PhaseKind::Idle => Ok(()),
            PhaseKind::Generating => Err(ControllerError::GenerationInFlight),
            phase => Err(ControllerError::InvalidTransition {
                action: "generate a quiz",
                phase,
            }),
        }
    }

    /// Idle -> Generating. Clears any previous error and issues a fresh token.
    pub fn begin_generation(
        &mut self,
        request: GenerationRequest,
    ) -> Result<GenerationTicket, ControllerError> {
        self.ensure_can_generate()?;

        let token = SessionToken::new();
        info!("Starting quiz generation {}", token);
        self.phase = AppPhase::Generating { token };
        Ok(GenerationTicket { token, request })
    }

    /// Like `begin_generation`, but builds the request from a draft once the phase allows it.
    pub fn begin_generation_from(
        &mut self,
        collector: &ContentCollector,
    ) -> Result<GenerationTicket, ControllerError> {
        self.ensure_can_generate()?;
        let request = collector.build()?;
        self.begin_generation(request)
    }

    /// Generating -> Quiz on success, Generating -> Idle (with error) on failure.
    /// A result whose token is not the one currently awaited is discarded.
    pub fn complete_generation(
        &mut self,
        token: SessionToken,
        result: Result<QuizData, GenerationError>,
    ) -> CompletionOutcome {
        match self.phase {
            AppPhase::Generating { token: current } if current == token => {}
            _ => {
                warn!(
                    "Discarding stale generation result {} while {}",
                    token,
                    self.kind()
                );
                return CompletionOutcome::Discarded;
            }
        }

        let next = match result {
            Ok(quiz) => match QuizSession::new(quiz) {
                Ok(session) => AppPhase::Quiz { session },
                Err(e) => {
                    error!("Generated quiz could not be started: {}", e);
                    AppPhase::Idle {
                        error: Some(GENERATION_FAILED_MESSAGE.to_string()),
                    }
                }
            },
            Err(e) => AppPhase::Idle {
                error: Some(e.user_message().to_string()),
            },
        };

        self.phase = next;
        info!("Generation {} completed; now {}", token, self.kind());
        CompletionOutcome::Applied(self.kind())
    }

    /// Runs a whole generation inline: begin, one gateway call, complete.
    pub async fn generate(
        &mut self,
        gateway: &QuizGateway,
        request: GenerationRequest,
    ) -> Result<PhaseKind, ControllerError> {
        let ticket = self.begin_generation(request)?;
        let result = gateway.generate(&ticket.request).await;
        self.complete_generation(ticket.token, result);
        Ok(self.kind())
    }

    // --- Quiz navigation ---

    fn session_mut(&mut self, action: &'static str) -> Result<&mut QuizSession, ControllerError> {
        match &mut self.phase {
            AppPhase::Quiz { session } => Ok(session),
            other => Err(ControllerError::InvalidTransition {
                action,
                phase: other.kind(),
            }),
        }
    }

    pub fn select_option(&mut self, option_index: usize) -> Result<(), ControllerError> {
        self.session_mut("select an answer")?
            .select_option(option_index)
            .map_err(ControllerError::from)
    }

    pub fn next(&mut self) -> Result<(), ControllerError> {
        self.session_mut("move to the next question")?
            .next()
            .map_err(ControllerError::from)
    }

    pub fn previous(&mut self) -> Result<(), ControllerError> {
        self.session_mut("move to the previous question")?.previous();
        Ok(())
    }

    /// Quiz -> Results. The session must be on its last question with an answer selected.
    pub fn finish(&mut self) -> Result<(), ControllerError> {
        let answers = self.session_mut("submit the quiz")?.finish()?;

        if let AppPhase::Quiz { session } = std::mem::replace(&mut self.phase, AppPhase::idle()) {
            let quiz = session.into_quiz();
            let report = score(&quiz, &answers);
            info!(
                "Quiz '{}' finished: {}/{} correct",
                quiz.title, report.correct_count, report.total
            );
            self.phase = AppPhase::Results {
                quiz,
                answers,
                report,
                finished_at: Utc::now(),
            };
        }
        Ok(())
    }

    // --- Reset ---

    /// Any phase -> Idle, dropping quiz, answers and error. An in-flight
    /// generation becomes stale.
    ///
    /// Returns `true` when a quiz attempt was left behind and `false` when the
    /// controller was already idle, where only the error is cleared.
    pub fn restart(&mut self) -> bool {
        let left_attempt = self.kind() != PhaseKind::Idle;
        if left_attempt {
            info!("Restarting from {}", self.kind());
        }
        self.phase = AppPhase::idle();
        left_attempt
    }
}
