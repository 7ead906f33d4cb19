//! services/client/src/ui/state.rs
//!
//! Holds the client's state for one interactive run and applies user commands to it.

use crate::adapters::media::load_media;
use crate::error::ClientError;
use crate::ui::generation_task::{spawn_generation, GenerationCompletion};
use crate::ui::protocol::{UserCommand, HELP_TEXT};
use quiz_master_core::{
    AppController, CompletionOutcome, ContentCollector, ControllerError, PhaseKind, QuestionCount,
    QuizGateway,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

/// Whether the input loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The state for a single interactive run.
///
/// The draft lives beside the controller rather than inside a phase, so it
/// survives a failed generation and the user can simply try again.
pub struct QuizRuntime {
    controller: AppController,
    collector: ContentCollector,
    gateway: QuizGateway,
    completions: UnboundedSender<GenerationCompletion>,
    notice: Option<String>,
}

impl QuizRuntime {
    /// Creates the runtime and the receiving end for generation results.
    pub fn new(
        gateway: QuizGateway,
        default_count: QuestionCount,
    ) -> (Self, UnboundedReceiver<GenerationCompletion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        let runtime = Self {
            controller: AppController::new(),
            collector: ContentCollector::new(default_count),
            gateway,
            completions,
            notice: None,
        };
        (runtime, receiver)
    }

    pub fn controller(&self) -> &AppController {
        &self.controller
    }

    pub fn collector(&self) -> &ContentCollector {
        &self.collector
    }

    /// A one-off message for the next screen, e.g. what just changed.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    fn ensure_idle(&self, action: &'static str) -> Result<(), ClientError> {
        match self.controller.kind() {
            PhaseKind::Idle => Ok(()),
            phase => Err(ControllerError::InvalidTransition { action, phase }.into()),
        }
    }

    /// Parses one typed line and applies it.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow, ClientError> {
        let command: UserCommand = line.parse()?;
        self.handle_command(command).await
    }

    /// Applies one command. Errors leave the state untouched and are meant to
    /// be shown to the user.
    pub async fn handle_command(&mut self, command: UserCommand) -> Result<Flow, ClientError> {
        match command {
            UserCommand::AddNotes(line) => {
                self.ensure_idle("edit the notes")?;
                self.collector.append_text(&line);
            }
            UserCommand::ClearNotes => {
                self.ensure_idle("edit the notes")?;
                self.collector.clear_text();
            }
            UserCommand::Attach(path) => {
                self.ensure_idle("attach a file")?;
                let media = load_media(&path).await?;
                self.notice = Some(format!("Attached {} ({}).", media.name(), media.mime_type()));
                self.collector.attach(media);
            }
            UserCommand::Detach => {
                self.ensure_idle("remove the attachment")?;
                if let Some(media) = self.collector.detach() {
                    self.notice = Some(format!("Removed {}.", media.name()));
                }
            }
            UserCommand::SetCount(count) => {
                self.ensure_idle("change the question count")?;
                self.collector.set_question_count(QuestionCount::try_from(count)?);
            }
            UserCommand::Generate => {
                let ticket = self.controller.begin_generation_from(&self.collector)?;
                spawn_generation(self.gateway.clone(), ticket, self.completions.clone());
            }
            UserCommand::Select(option_index) => self.controller.select_option(option_index)?,
            UserCommand::Next => {
                let was_last = self.controller.session().is_some_and(|s| s.is_last());
                self.controller.next()?;
                if was_last {
                    self.notice = Some("This is the last question. Type 'submit' to finish.".to_string());
                }
            }
            UserCommand::Previous => self.controller.previous()?,
            UserCommand::Submit => self.controller.finish()?,
            UserCommand::Restart => {
                // At Idle only the error goes; the draft is kept.
                if self.controller.restart() {
                    self.collector.reset();
                }
            }
            UserCommand::Help => self.notice = Some(HELP_TEXT.to_string()),
            UserCommand::Quit => {
                info!("User quit.");
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Hands a finished generation to the controller, which ignores stale ones.
    pub fn apply_completion(&mut self, completion: GenerationCompletion) -> CompletionOutcome {
        self.controller
            .complete_generation(completion.token, completion.result)
    }
}
