//! services/client/src/ui/terminal.rs
//!
//! This is the main entry point and control loop for an interactive terminal session.
//! It reads commands from stdin, applies finished generations, and redraws the screen.

use crate::{
    error::ClientError,
    ui::{
        generation_task::GenerationCompletion,
        protocol::HELP_TEXT,
        render::render,
        state::{Flow, QuizRuntime},
    },
};
use quiz_master_core::CompletionOutcome;
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::mpsc::UnboundedReceiver,
};
use tracing::{debug, error, info};

/// Runs until the user quits or stdin closes.
pub async fn run_terminal(
    mut runtime: QuizRuntime,
    mut completions: UnboundedReceiver<GenerationCompletion>,
) -> Result<(), ClientError> {
    let mut lines = BufReader::new(io::stdin()).lines();

    println!("{}", HELP_TEXT);
    redraw(&mut runtime);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed.");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                if handle_line(&mut runtime, &line).await == Flow::Quit {
                    break;
                }
                redraw(&mut runtime);
            }
            Some(completion) = completions.recv() => {
                match runtime.apply_completion(completion) {
                    CompletionOutcome::Applied(phase) => {
                        debug!("Generation applied; now {}.", phase);
                        redraw(&mut runtime);
                    }
                    CompletionOutcome::Discarded => {}
                }
            }
        }
    }

    info!("Terminal session closed.");
    Ok(())
}

/// Applies one line, printing any problem instead of failing the loop.
async fn handle_line(runtime: &mut QuizRuntime, line: &str) -> Flow {
    match runtime.handle_line(line).await {
        Ok(flow) => flow,
        Err(e) => {
            match &e {
                ClientError::Io(_) => error!("Command failed: {}", e),
                _ => debug!("Command rejected: {}", e),
            }
            println!("{}", e);
            Flow::Continue
        }
    }
}

fn redraw(runtime: &mut QuizRuntime) {
    println!("\n{}", render(runtime));
    if let Some(notice) = runtime.take_notice() {
        println!("{}", notice);
    }
}
