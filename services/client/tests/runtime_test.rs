mod common;

use common::{runtime_with, FakeProvider, TWO_QUESTION_QUIZ};
use quiz_client_lib::{
    error::ClientError,
    ui::{
        protocol::{ProtocolError, UserCommand},
        render::render,
        Flow,
    },
};
use quiz_master_core::{
    CompletionOutcome, ControllerError, PhaseKind, ValidationError, GENERATION_FAILED_MESSAGE,
};
use std::sync::Arc;
use tokio::sync::Notify;

#[tokio::test]
async fn notes_to_results_and_back_to_a_clean_draft() {
    let provider = Arc::new(FakeProvider::replying(TWO_QUESTION_QUIZ));
    let (mut runtime, mut completions) = runtime_with(provider.clone());

    runtime
        .handle_command(UserCommand::AddNotes("Plants make sugar from light.".into()))
        .await
        .unwrap();
    runtime.handle_command(UserCommand::Generate).await.unwrap();
    assert_eq!(runtime.controller().kind(), PhaseKind::Generating);
    assert!(render(&runtime).contains("Crafting your quiz..."));

    let completion = completions.recv().await.expect("generation should report back");
    assert_eq!(
        runtime.apply_completion(completion),
        CompletionOutcome::Applied(PhaseKind::Quiz)
    );
    assert_eq!(provider.calls(), 1);
    assert!(render(&runtime).contains("Question 1 of 2  (50% complete)"));

    runtime.handle_command(UserCommand::Select(1)).await.unwrap();
    runtime.handle_command(UserCommand::Next).await.unwrap();
    runtime.handle_command(UserCommand::Select(0)).await.unwrap();
    runtime.handle_command(UserCommand::Submit).await.unwrap();

    assert_eq!(runtime.controller().kind(), PhaseKind::Results);
    let report = runtime.controller().report().unwrap();
    assert_eq!(report.correct_count, 1);
    assert_eq!(report.total, 2);
    assert!(render(&runtime).contains("1 / 2  (50% Success)"));

    runtime.handle_command(UserCommand::Restart).await.unwrap();
    assert_eq!(runtime.controller().kind(), PhaseKind::Idle);
    assert!(runtime.controller().quiz().is_none());
    assert!(runtime.collector().text().is_empty());
}

#[tokio::test]
async fn restarting_while_generating_discards_the_late_result() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(FakeProvider::gated(TWO_QUESTION_QUIZ, gate.clone()));
    let (mut runtime, mut completions) = runtime_with(provider);

    runtime
        .handle_command(UserCommand::AddNotes("Cell biology".into()))
        .await
        .unwrap();
    runtime.handle_command(UserCommand::Generate).await.unwrap();
    runtime.handle_command(UserCommand::Restart).await.unwrap();
    assert_eq!(runtime.controller().kind(), PhaseKind::Idle);

    gate.notify_one();
    let late = completions.recv().await.expect("the task still reports back");
    assert_eq!(runtime.apply_completion(late), CompletionOutcome::Discarded);
    assert_eq!(runtime.controller().kind(), PhaseKind::Idle);
    assert!(runtime.controller().error().is_none());
}

#[tokio::test]
async fn a_failed_generation_keeps_the_draft_for_a_retry() {
    let provider = Arc::new(FakeProvider::failing("quota exceeded"));
    let (mut runtime, mut completions) = runtime_with(provider.clone());

    runtime
        .handle_command(UserCommand::AddNotes("The French Revolution".into()))
        .await
        .unwrap();
    runtime.handle_command(UserCommand::SetCount(10)).await.unwrap();
    runtime.handle_command(UserCommand::Generate).await.unwrap();

    let completion = completions.recv().await.unwrap();
    assert_eq!(
        runtime.apply_completion(completion),
        CompletionOutcome::Applied(PhaseKind::Idle)
    );
    assert_eq!(runtime.controller().error(), Some(GENERATION_FAILED_MESSAGE));
    assert_eq!(runtime.collector().text(), "The French Revolution");
    assert_eq!(runtime.collector().question_count().get(), 10);
    assert!(render(&runtime).contains(GENERATION_FAILED_MESSAGE));

    // Retrying from the error state is allowed and clears the error.
    runtime.handle_command(UserCommand::Generate).await.unwrap();
    assert!(runtime.controller().error().is_none());
    assert_eq!(runtime.controller().kind(), PhaseKind::Generating);
}

#[tokio::test]
async fn restart_after_a_failure_clears_the_error_but_keeps_the_draft() {
    let provider = Arc::new(FakeProvider::failing("service unavailable"));
    let (mut runtime, mut completions) = runtime_with(provider);

    runtime
        .handle_command(UserCommand::AddNotes("Plate tectonics".into()))
        .await
        .unwrap();
    runtime.handle_command(UserCommand::Generate).await.unwrap();
    let completion = completions.recv().await.unwrap();
    runtime.apply_completion(completion);
    assert_eq!(runtime.controller().error(), Some(GENERATION_FAILED_MESSAGE));

    runtime.handle_command(UserCommand::Restart).await.unwrap();
    assert_eq!(runtime.controller().kind(), PhaseKind::Idle);
    assert!(runtime.controller().error().is_none());
    assert_eq!(runtime.collector().text(), "Plate tectonics");
    assert!(!render(&runtime).contains(GENERATION_FAILED_MESSAGE));
}

#[tokio::test]
async fn generating_needs_content_and_only_one_attempt_at_a_time() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(FakeProvider::gated(TWO_QUESTION_QUIZ, gate));
    let (mut runtime, _completions) = runtime_with(provider.clone());

    let empty = runtime.handle_command(UserCommand::Generate).await;
    assert!(matches!(
        empty,
        Err(ClientError::Controller(ControllerError::Validation(
            ValidationError::MissingContent
        )))
    ));
    assert_eq!(runtime.controller().kind(), PhaseKind::Idle);
    assert_eq!(provider.calls(), 0);

    runtime
        .handle_command(UserCommand::AddNotes("Tides".into()))
        .await
        .unwrap();
    runtime.handle_command(UserCommand::Generate).await.unwrap();
    let again = runtime.handle_command(UserCommand::Generate).await;
    assert!(matches!(
        again,
        Err(ClientError::Controller(ControllerError::GenerationInFlight))
    ));
}

#[tokio::test]
async fn quiz_commands_are_gated_by_phase_and_answers() {
    let provider = Arc::new(FakeProvider::replying(TWO_QUESTION_QUIZ));
    let (mut runtime, mut completions) = runtime_with(provider);

    let early = runtime.handle_command(UserCommand::Select(0)).await;
    assert!(matches!(
        early,
        Err(ClientError::Controller(ControllerError::InvalidTransition {
            phase: PhaseKind::Idle,
            ..
        }))
    ));

    runtime
        .handle_command(UserCommand::AddNotes("Volcanoes".into()))
        .await
        .unwrap();
    runtime.handle_command(UserCommand::Generate).await.unwrap();
    let completion = completions.recv().await.unwrap();
    runtime.apply_completion(completion);

    assert!(runtime.handle_command(UserCommand::Next).await.is_err());
    assert!(runtime.handle_command(UserCommand::Submit).await.is_err());
    assert_eq!(runtime.controller().session().unwrap().position(), 1);

    let draft_edit = runtime
        .handle_command(UserCommand::AddNotes("more".into()))
        .await;
    assert!(matches!(
        draft_edit,
        Err(ClientError::Controller(ControllerError::InvalidTransition {
            phase: PhaseKind::Quiz,
            ..
        }))
    ));

    runtime.handle_command(UserCommand::Select(1)).await.unwrap();
    runtime.handle_command(UserCommand::Next).await.unwrap();
    runtime.handle_command(UserCommand::Select(2)).await.unwrap();

    // Next on the last question stays put and points at submit.
    runtime.handle_command(UserCommand::Next).await.unwrap();
    assert_eq!(runtime.controller().session().unwrap().position(), 2);
    assert!(runtime.take_notice().unwrap().contains("submit"));

    runtime.handle_command(UserCommand::Previous).await.unwrap();
    assert_eq!(runtime.controller().session().unwrap().position(), 1);
}

#[tokio::test]
async fn attachments_are_loaded_from_disk_and_checked() {
    let provider = Arc::new(FakeProvider::replying(TWO_QUESTION_QUIZ));
    let (mut runtime, _completions) = runtime_with(provider);

    let dir = std::env::temp_dir().join(format!("quiz-runtime-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let page = dir.join("page.png");
    let archive = dir.join("notes.zip");
    std::fs::write(&page, b"\x89PNG fake").unwrap();
    std::fs::write(&archive, b"PK").unwrap();

    runtime
        .handle_command(UserCommand::Attach(page.clone()))
        .await
        .unwrap();
    assert_eq!(runtime.collector().media().unwrap().mime_type(), "image/png");
    assert!(runtime.collector().can_submit());
    assert!(runtime.take_notice().unwrap().contains("page.png"));

    let rejected = runtime.handle_command(UserCommand::Attach(archive)).await;
    assert!(matches!(
        rejected,
        Err(ClientError::Validation(ValidationError::UnsupportedMedia(_)))
    ));
    assert_eq!(runtime.collector().media().unwrap().name(), "page.png");

    runtime.handle_command(UserCommand::Detach).await.unwrap();
    assert!(runtime.collector().media().is_none());
    assert!(!runtime.collector().can_submit());

    assert_eq!(
        runtime.handle_command(UserCommand::Quit).await.unwrap(),
        Flow::Quit
    );
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn typed_lines_are_parsed_into_commands_or_protocol_errors() {
    let provider = Arc::new(FakeProvider::replying(TWO_QUESTION_QUIZ));
    let (mut runtime, _completions) = runtime_with(provider);

    let unknown = runtime.handle_line("teleport home").await;
    assert!(matches!(
        unknown,
        Err(ClientError::Protocol(ProtocolError::Unknown(_)))
    ));
    let missing = runtime.handle_line("attach").await;
    assert!(matches!(
        missing,
        Err(ClientError::Protocol(ProtocolError::MissingArgument("attach")))
    ));

    runtime.handle_line("notes Ocean currents").await.unwrap();
    assert_eq!(runtime.collector().text(), "Ocean currents");

    runtime.handle_line("help").await.unwrap();
    assert!(runtime.take_notice().unwrap().starts_with("Commands"));

    assert_eq!(runtime.handle_line("quit").await.unwrap(), Flow::Quit);
}
