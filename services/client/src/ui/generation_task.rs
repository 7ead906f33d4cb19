//! services/client/src/ui/generation_task.rs
//!
//! The asynchronous "worker" that performs one quiz generation call off the input loop.

use quiz_master_core::{GenerationError, GenerationTicket, QuizData, QuizGateway, SessionToken};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The result of one generation attempt, tagged with the attempt's token.
#[derive(Debug)]
pub struct GenerationCompletion {
    pub token: SessionToken,
    pub result: Result<QuizData, GenerationError>,
}

/// Spawns the provider call and reports back on `completions`.
///
/// The task is never aborted; if the user restarts meanwhile, the controller
/// discards the completion because its token is stale.
pub fn spawn_generation(
    gateway: QuizGateway,
    ticket: GenerationTicket,
    completions: UnboundedSender<GenerationCompletion>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Generation task {} started.", ticket.token);
        let result = gateway.generate(&ticket.request).await;

        let completion = GenerationCompletion {
            token: ticket.token,
            result,
        };
        if completions.send(completion).is_err() {
            warn!(
                "Client shut down before generation {} finished; dropping the result.",
                ticket.token
            );
        }
    })
}
